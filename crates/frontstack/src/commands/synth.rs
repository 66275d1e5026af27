use crate::manifest::Manifest;
use colored::Colorize;
use frontstack_config::Overrides;
use frontstack_core::TemplateFormat;
use std::path::Path;

pub async fn handle(
    config_path: Option<&Path>,
    overrides: Overrides,
    format: TemplateFormat,
    out: &Path,
    stdout: bool,
) -> anyhow::Result<()> {
    let (config, _) = super::resolve_config(config_path, overrides);

    let synthesized = match frontstack_stack::synth(&config) {
        Ok(synthesized) => synthesized,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ Synthesis failed".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let rendered = synthesized.template.render(format)?;

    if stdout {
        println!("{}", rendered);
        return Ok(());
    }

    tokio::fs::create_dir_all(out).await?;
    let template_file = format!(
        "{}.template.{}",
        synthesized.stack_name,
        format.extension()
    );
    let template_path = out.join(&template_file);
    tokio::fs::write(&template_path, rendered).await?;

    let manifest = Manifest::new(&config, &synthesized, &template_file);
    let manifest_path = manifest.write(out).await?;

    println!(
        "{} {} ({} resources)",
        "✓ Synthesized".green().bold(),
        synthesized.stack_name.cyan(),
        synthesized.template.resources.len()
    );
    println!("  template: {}", template_path.display());
    println!("  manifest: {}", manifest_path.display());

    Ok(())
}
