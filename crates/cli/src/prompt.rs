use dialoguer::console::Term;
use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};

const LAUNCH_QUESTION: &str = "Do you want to launch the dashboard? (y/n)";

/// Asks whether to serve the dashboard. Anything but `y`/`Y` means no.
///
/// Uses an interactive prompt when attached to a terminal, otherwise asks on
/// stdout and reads one line from stdin so piped answers still work.
pub fn confirm_dashboard_launch() -> bool {
    if Term::stderr().is_term() && io::stdin().is_terminal() {
        let answer = Input::<String>::new()
            .with_prompt(LAUNCH_QUESTION)
            .allow_empty(true)
            .interact_text();

        return match answer {
            Ok(answer) => is_affirmative(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "could not read an answer, not launching the dashboard");
                false
            }
        };
    }

    let mut stdout = io::stdout();
    let _ = write!(stdout, "{}: ", LAUNCH_QUESTION);
    let _ = stdout.flush();
    read_answer(io::stdin().lock())
}

/// Reads one answer line. End of input or a read error count as no.
pub fn read_answer(mut input: impl BufRead) -> bool {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => false,
        Ok(_) => is_affirmative(&line),
        Err(e) => {
            tracing::warn!(error = %e, "could not read an answer, not launching the dashboard");
            false
        }
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
