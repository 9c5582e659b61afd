use std::io;

fn main() {
    if std::env::var_os("RUST_LOG").is_some() {
        cardroom_room::init_logging();
    }
    let code = cardroom_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
