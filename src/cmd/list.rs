use crate::registry::Registry;
use colored::Colorize;

pub fn list(registry: &Registry) {
    println!("{}", "Available templates:".cyan());
    for template in registry.list() {
        println!("  {}\n    {}", template.key.green().bold(), template.description);
    }
    println!(
        "\n{} {}",
        "Usage:".dimmed(),
        "scaffold --template <template-name> [project-name]".yellow()
    );
}
