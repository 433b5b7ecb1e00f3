use colored::*;

pub fn show() {
    let banner = r#"
    ███████╗ ██████╗ ██████╗ ████████╗███████╗ ██████╗ █████╗ ███╗   ██╗
    ██╔════╝██╔═══██╗██╔══██╗╚══██╔══╝██╔════╝██╔════╝██╔══██╗████╗  ██║
    █████╗  ██║   ██║██████╔╝   ██║   ███████╗██║     ███████║██╔██╗ ██║
    ██╔══╝  ██║   ██║██╔══██╗   ██║   ╚════██║██║     ██╔══██║██║╚██╗██║
    ██║     ╚██████╔╝██║  ██║   ██║   ███████║╚██████╗██║  ██║██║ ╚████║
    ╚═╝      ╚═════╝ ╚═╝  ╚═╝   ╚═╝   ╚══════╝ ╚═════╝╚═╝  ╚═╝╚═╝  ╚═══╝
    "#;

    println!("{}", banner.bright_red());
    println!("    {}", "Port, service and web header reconnaissance written in Rust".bright_yellow());
    println!("    {}", format!("Version: {}", env!("CARGO_PKG_VERSION")).bright_yellow());
    println!();
}
