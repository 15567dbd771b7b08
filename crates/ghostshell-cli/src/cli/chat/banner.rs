//! Welcome banner shown when a chat session starts.

use console::style;

/// Print the source, model, channel and active enhancers.
pub fn print_welcome_banner(source: &str, model: &str, channel: &str, enhancers: &[&str]) {
    println!();
    println!("  {} {}", style("~").cyan(), style("ghostshell").cyan().bold());
    println!();
    println!("  {}   {}", style("Source:").bold(), style(source).dim());
    println!("  {}    {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Channel:").bold(), style(channel).dim());
    if !enhancers.is_empty() {
        println!(
            "  {} {}",
            style("Enhancers:").bold(),
            style(enhancers.join(", ")).dim()
        );
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, quit or Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
