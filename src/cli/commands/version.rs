/// Execute version command
pub fn execute() {
    println!("docket {}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
}
