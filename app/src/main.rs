mod cli;

// Exit codes: 0 success, 1 the IL spec could not be read or loaded, 2 a
// loaded spec failed to interpret (unbound definition, arity mismatch,
// relation/function evaluation error). 130 on SIGINT needs no code here:
// we install no signal handler, so the OS default disposition already
// terminates the process with that status.
fn main() {
    miette::set_panic_hook();

    if let Err(failure) = cli::exec() {
        use std::io::IsTerminal;
        let colorize = std::io::stderr().is_terminal();
        eprint!("{}", p4st_miette_util::render_report_to_string(failure.report(), colorize));
        std::process::exit(failure.exit_code());
    }
}
