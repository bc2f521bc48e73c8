//! Console output shared by the commands.

use colored::Colorize;

/// Prints a list of document problems under an "Errors:" heading.
pub(super) fn print_problems(problems: &[String]) {
    println!("\n{}", "Errors:".red().bold());
    for problem in problems {
        println!("  {} {}", "x".red(), problem);
    }
}

/// Prints the failure line for an invalid document.
pub(super) fn print_invalid(problems: &[String]) {
    print_problems(problems);
    println!(
        "\n{} Document has {} error(s)",
        "FAILED".red().bold(),
        problems.len()
    );
}
