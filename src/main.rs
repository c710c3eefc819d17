fn main() {
    if let Err(err) = medichat::cli::main() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
