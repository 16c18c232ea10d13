//! Welcome banner and lore shown when the terminal opens.

use console::style;

pub const TITLE: &str = "Welcome to Ikarus Terminal";

pub const LORE: [&str; 2] = [
    "When Ikarus fell toward the sun, the Solarii saw his descent as a prophecy: \
a being born of ambition who could transcend mortal limits and embody the essence \
of transformation. They saved him and guided him through the Trials of Ignis, a \
series of spiritual and physical challenges to confront his guilt and learn the \
balance between ambition and humility.",
    "Through their teachings, Ikarus learned that true flight was not about escaping \
but embracing. As he absorbed these lessons, his spirit awakened, allowing him to \
grow his own real wings, forged from the union of his soul and the sun's light.",
];

/// Print the title, the lore paragraphs and the endpoint in use.
pub fn print_welcome_banner(endpoint: &str) {
    println!();
    println!("  {}", style(TITLE).red().bold());
    println!();
    for paragraph in LORE {
        for line in wrap(paragraph, 76) {
            println!("  {}", style(line).dim());
        }
        println!();
    }
    println!("  {}  {}", style("Relay:").bold(), style(endpoint).dim());
    println!("  {}", style("Ctrl+D to leave at any time").dim());
    println!("  {}", style("---").dim());
    println!();
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
