use colored::Colorize;
use frontstack_config::Overrides;
use std::path::Path;

pub async fn handle(config_path: Option<&Path>, overrides: Overrides) -> anyhow::Result<()> {
    println!("{}", "Validating config...".blue());

    let (config, source) = super::resolve_config(config_path, overrides);
    match &source {
        Some(path) => println!("Config file: {}", path.display().to_string().cyan()),
        None => println!("Config file: {}", "(none, defaults and environment)".dimmed()),
    }

    let synthesized = match frontstack_stack::synth(&config) {
        Ok(synthesized) => synthesized,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ Config error".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let template = &synthesized.template;
    println!("{}", "✓ Config is valid!".green().bold());
    println!();
    println!("Summary:");
    println!("  Stack: {}", synthesized.stack_name.cyan());
    println!("  Prefix: {}", config.prefix);
    println!(
        "  Account: {}",
        config.account.as_deref().unwrap_or("(resolved at deploy time)")
    );
    println!("  Region: {}", config.region);
    if let Some(domain) = &config.domain {
        println!("  Domain: {}", domain.cyan());
    }
    println!("  Resources: {}", template.resources.len());
    for (kind, count) in template.kind_summary() {
        println!("    - {} ({})", kind.label().cyan(), count);
    }
    println!("  Outputs: {}", template.outputs.len());
    for name in template.outputs.keys() {
        println!("    - {}", name);
    }

    Ok(())
}
