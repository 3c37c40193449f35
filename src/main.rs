fn main() {
    if let Err(e) = screen_companion_lib::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
