//! Binary entrypoint for fontslim-cli (made by FontLab https://www.fontlab.com/)

fn main() {
    if let Err(err) = fontslim_cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
