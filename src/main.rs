fn main() {
    if let Err(err) = worldcup_insights::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
