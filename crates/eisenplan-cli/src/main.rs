mod cli;
mod render;
mod shell;

fn main() {
    if let Err(err) = shell::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
