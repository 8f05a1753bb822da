fn main() {
    if let Err(err) = scatterlabel::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
