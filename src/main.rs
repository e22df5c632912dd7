fn main() {
    if let Err(err) = csv_ddl::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
