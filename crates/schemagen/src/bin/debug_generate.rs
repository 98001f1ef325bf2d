//! Debug script to see what the generator produces for a snapshot dump.
//!
//! Usage: `debug_generate <snapshot.json> [expr-demo]`

use std::path::Path;

use miette::IntoDiagnostic;
use schemagen::query::{ElementType, Expr, LiteralType, Value};
use schemagen::{Generator, GeneratorConfig, Snapshot};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next() else {
        return Err(miette::miette!("usage: debug_generate <snapshot.json> [expr-demo]"));
    };

    let snapshot = Snapshot::load(Path::new(&snapshot_path))?;
    let generated = Generator::new(GeneratorConfig::default()).generate(&snapshot)?;

    for (path, content) in generated.rendered() {
        println!("// ===== {} =====", path);
        println!("{}", content);
    }

    if args.next().as_deref() == Some("expr-demo") {
        let names = Expr::path("default::User")
            .property("name", ElementType::scalar("std::str"))?;
        let ids = Expr::set(vec![
            Expr::literal(LiteralType::scalar("std::int64"), Value::Int(1)),
            Expr::literal(LiteralType::scalar("std::int64"), Value::Int(2)),
        ])?;
        println!("{}", names.to_edgeql()?);
        println!("{}", ids.to_edgeql()?);
    }

    std::io::Write::flush(&mut std::io::stdout()).into_diagnostic()?;
    Ok(())
}
