fn main() {
    if let Err(err) = teabox_data::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
