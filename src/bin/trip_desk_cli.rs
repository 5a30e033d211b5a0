use std::process;

fn main() {
    trip_desk::init();

    if let Err(err) = trip_desk::cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
