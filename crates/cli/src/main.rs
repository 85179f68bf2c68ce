fn main() {
    if let Err(e) = rubyscope_cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
