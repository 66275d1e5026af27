use colored::Colorize;
use frontstack_core::{
    Prefix, PrefixOutcome, PrefixVisitor, ResourceNode, Template, TemplateFormat, Visitor,
};
use std::cell::RefCell;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq)]
struct Tally {
    renamed: usize,
    unchanged: usize,
    unresolved: usize,
    tagged: usize,
}

/// Counts the outcome of each node the prefix visitor handles
struct Tallying<'a> {
    visitor: &'a PrefixVisitor,
    tally: RefCell<Tally>,
}

impl Visitor for Tallying<'_> {
    fn visit(&self, logical_id: &str, node: &mut ResourceNode) {
        let outcome = self.visitor.visit_node(logical_id, node);
        let mut tally = self.tally.borrow_mut();
        match outcome {
            PrefixOutcome::Renamed { .. } => tally.renamed += 1,
            PrefixOutcome::AlreadyPrefixed | PrefixOutcome::NoValue => tally.unchanged += 1,
            PrefixOutcome::Unresolved => tally.unresolved += 1,
            PrefixOutcome::Tagged => tally.tagged += 1,
        }
    }
}

pub async fn handle(
    template_path: &Path,
    prefix: &str,
    output: Option<&Path>,
    format: Option<TemplateFormat>,
) -> anyhow::Result<()> {
    let prefix = Prefix::new(prefix)?;
    let (mut template, detected) = Template::load(template_path)?;
    let format = format.unwrap_or(detected);

    let visitor = PrefixVisitor::new(prefix);
    let tally = apply(&visitor, &mut template);
    let rendered = template.render(format)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, rendered).await?;
            println!(
                "{} {}",
                "✓ Prefix applied:".green().bold(),
                visitor.prefix().as_str().cyan()
            );
            println!("  renamed: {}", tally.renamed);
            println!("  already prefixed or unnamed: {}", tally.unchanged);
            println!("  deploy-time names left as is: {}", tally.unresolved);
            println!("  tagged: {}", tally.tagged);
            println!("  output: {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn apply(visitor: &PrefixVisitor, template: &mut Template) -> Tally {
    let tallying = Tallying {
        visitor,
        tally: RefCell::default(),
    };
    template.walk(&tallying);
    tallying.tally.into_inner()
}
