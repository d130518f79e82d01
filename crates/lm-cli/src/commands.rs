use std::io::Read;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::{json, Value};
use tracing::debug;

use lm_meta::{
    field_changes, AffectedNode, BatchFailure, BatchPolicy, DecodabilityRegistry, DecoderConfig,
    FieldChange, MetadataDecoder, TransactionMetadata,
};
use lm_types::{CurrencyAmount, LedgerEntryType};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Decode(args) => cmd_decode(args, cli.format),
        Command::Changes(args) => cmd_changes(args, cli.format),
        Command::Catalog(args) => cmd_catalog(args, cli.format),
    }
}

/// What the user handed us.
#[derive(Debug)]
enum Input {
    Metadata(Value),
    Nodes(Vec<Value>),
}

enum Decoded {
    Metadata(TransactionMetadata),
    Nodes(Vec<AffectedNode>),
}

impl Decoded {
    fn nodes(&self) -> &[AffectedNode] {
        match self {
            Self::Metadata(meta) => &meta.affected_nodes,
            Self::Nodes(nodes) => nodes,
        }
    }

    fn to_json(&self) -> serde_json::Result<Value> {
        match self {
            Self::Metadata(meta) => serde_json::to_value(meta),
            Self::Nodes(nodes) => serde_json::to_value(nodes),
        }
    }
}

fn read_input(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        text
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading {source}"))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing {source} as JSON"))
}

/// Accepts a metadata object, a transaction carrying one under `meta` or
/// `metaData`, or a bare `AffectedNodes` array.
fn classify(value: Value) -> anyhow::Result<Input> {
    match value {
        Value::Array(nodes) => Ok(Input::Nodes(nodes)),
        Value::Object(mut map) => {
            if map.contains_key("AffectedNodes") {
                return Ok(Input::Metadata(Value::Object(map)));
            }
            match map.remove("meta").or_else(|| map.remove("metaData")) {
                Some(meta @ Value::Object(_)) => classify(meta),
                _ => bail!("expected transaction metadata or an AffectedNodes array"),
            }
        }
        other => bail!("expected a JSON object or array, got {other}"),
    }
}

fn decode(
    decoder: &MetadataDecoder,
    input: Input,
    config: &DecoderConfig,
) -> anyhow::Result<(Decoded, Vec<BatchFailure>)> {
    match input {
        Input::Metadata(meta) => {
            let (meta, failures) = decoder.decode_metadata_with(&meta, config)?;
            Ok((Decoded::Metadata(meta), failures))
        }
        Input::Nodes(nodes) => {
            let outcome = decoder.decode_batch_with(&nodes, config)?;
            Ok((Decoded::Nodes(outcome.nodes), outcome.failures))
        }
    }
}

fn cmd_decode(args: DecodeArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => DecoderConfig::load(path)?,
        None => DecoderConfig::default(),
    };
    if args.skip_invalid {
        config.policy = BatchPolicy::SkipInvalid;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    debug!(?config, input = %args.input, "decoding");

    let input = classify(read_input(&args.input)?)?;
    let (decoded, failures) = decode(&MetadataDecoder::default(), input, &config)
        .with_context(|| format!("decoding {}", args.input))?;

    for failure in &failures {
        eprintln!("{} node {}: {}", "skipped".yellow(), failure.position, failure.error);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&decoded.to_json()?)?);
        }
        OutputFormat::Text => {
            if let Decoded::Metadata(meta) = &decoded {
                println!("{}", render_summary(meta));
            }
            for node in decoded.nodes() {
                println!("  {}", render_node(node));
            }
            let identity_only = decoded.nodes().iter().filter(|n| !n.is_decoded()).count();
            println!(
                "{} {} nodes, {} identity only, {} skipped",
                "✓".green().bold(),
                decoded.nodes().len(),
                identity_only,
                failures.len()
            );
        }
    }
    Ok(())
}

fn cmd_changes(args: ChangesArgs, format: OutputFormat) -> anyhow::Result<()> {
    let input = classify(read_input(&args.input)?)?;
    let (decoded, _) = decode(&MetadataDecoder::default(), input, &DecoderConfig::default())
        .with_context(|| format!("decoding {}", args.input))?;

    let mut reports = Vec::new();
    for node in decoded.nodes() {
        if let AffectedNode::Modified(modified) = node {
            reports.push((node, field_changes(modified)?));
        }
    }

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = reports
                .iter()
                .map(|(node, changes)| {
                    json!({
                        "LedgerEntryType": node.identifier().entry_type,
                        "LedgerIndex": node.identifier().ledger_index,
                        "changes": changes,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            if reports.is_empty() {
                println!("No modified objects.");
            }
            for (node, changes) in &reports {
                println!("{}", render_node(node));
                match changes {
                    Some(changes) if !changes.is_empty() => {
                        for change in &changes.changes {
                            println!("  {}", render_change(change));
                        }
                    }
                    Some(_) => println!("  {}", "no field changes".dimmed()),
                    None => println!("  {}", "previous state not available".dimmed()),
                }
            }
        }
    }
    Ok(())
}

fn cmd_catalog(args: CatalogArgs, format: OutputFormat) -> anyhow::Result<()> {
    let registry = DecodabilityRegistry::global();
    let rows: Vec<_> = catalog_rows(&registry)
        .into_iter()
        .filter(|(_, decodable)| *decodable || !args.decodable)
        .collect();

    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = rows
                .iter()
                .map(|(kind, decodable)| {
                    json!({"LedgerEntryType": kind.as_str(), "decodable": decodable})
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Text => {
            for (kind, decodable) in rows {
                if decodable {
                    println!("  {} {}", "✓".green(), kind.as_str().bold());
                } else {
                    println!("  {} {} {}", "·".dimmed(), kind.as_str(), "identity only".dimmed());
                }
            }
        }
    }
    Ok(())
}

fn catalog_rows(registry: &DecodabilityRegistry) -> Vec<(LedgerEntryType, bool)> {
    LedgerEntryType::ALL
        .iter()
        .map(|kind| (*kind, registry.is_decodable(&kind.tag())))
        .collect()
}

fn render_summary(meta: &TransactionMetadata) -> String {
    let result = if meta.is_success() {
        meta.transaction_result.green()
    } else {
        meta.transaction_result.red()
    };
    let mut line = format!("Transaction #{} {}", meta.transaction_index, result);
    if let Some(amount) = &meta.delivered_amount {
        line.push_str(&format!(", delivered {}", render_amount(amount)));
    }
    line
}

fn render_amount(amount: &CurrencyAmount) -> String {
    match amount {
        CurrencyAmount::Xrp(drops) => format!("{} drops", drops.drops()),
        CurrencyAmount::Issued(issued) => format!("{} {}", issued.value, issued.currency),
    }
}

fn render_node(node: &AffectedNode) -> String {
    let id = node.identifier();
    let status = if node.is_decoded() {
        "decoded".green()
    } else {
        "identity only".dimmed()
    };
    format!(
        "{} {:<16} {} {}",
        format!("{:<13}", node.kind()).cyan(),
        id.entry_type.as_str(),
        id.ledger_index.short_hex().yellow(),
        status
    )
}

fn render_change(change: &FieldChange) -> String {
    match change {
        FieldChange::Added { field, value } => format!("{} {field}: {value}", "+".green()),
        FieldChange::Removed { field, value } => format!("{} {field}: {value}", "-".red()),
        FieldChange::Modified {
            field,
            previous,
            current,
        } => format!("{} {field}: {previous} -> {current}", "~".yellow()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn account_root_modification() -> Value {
        json!({"ModifiedNode": {
            "FinalFields": {
                "Account": "rphDLpCwJyPEBuZccdBCWPUgAXUd96dUCJ",
                "Balance": "29999999940",
                "Flags": 8388608,
                "OwnerCount": 0,
                "Sequence": 57013
            },
            "LedgerEntryType": "AccountRoot",
            "LedgerIndex": "EC6AA5542F739EE340315EAC0B67ABCC8B5533DD683AE3C9AD1C311240D86317",
            "PreviousFields": {"Balance": "29999999950", "Sequence": 57012},
            "PreviousTxnID": "D1AD67D98F160A7AA518E969803393DEFE0F0132E66205230021DFDDAAE58AA4",
            "PreviousTxnLgrSeq": 109607
        }})
    }

    fn metadata() -> Value {
        json!({
            "AffectedNodes": [account_root_modification()],
            "TransactionIndex": 0,
            "TransactionResult": "tesSUCCESS",
            "delivered_amount": "10"
        })
    }

    #[test]
    fn classify_accepts_three_shapes() {
        assert!(matches!(classify(metadata()).unwrap(), Input::Metadata(_)));
        assert!(matches!(
            classify(json!({"hash": "AB", "meta": metadata()})).unwrap(),
            Input::Metadata(_)
        ));
        assert!(matches!(
            classify(json!([account_root_modification()])).unwrap(),
            Input::Nodes(nodes) if nodes.len() == 1
        ));
    }

    #[test]
    fn classify_rejects_other_json() {
        assert!(classify(json!("meta")).is_err());
        assert!(classify(json!({"TransactionIndex": 0})).is_err());
        assert!(classify(json!({"meta": "unavailable"})).is_err());
    }

    #[test]
    fn read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", metadata()).unwrap();
        let path = file.path().to_string_lossy().into_owned();
        assert_eq!(read_input(&path).unwrap(), metadata());

        let err = read_input("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("not/here.json"));
    }

    #[test]
    fn decode_reports_failures_when_skipping() {
        let input = classify(json!([
            account_root_modification(),
            {"CreatedNode": {"LedgerEntryType": "Offer"}}
        ]))
        .unwrap();
        let (decoded, failures) =
            decode(&MetadataDecoder::default(), input, &DecoderConfig::lenient()).unwrap();
        assert_eq!(decoded.nodes().len(), 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].position, 1);
    }

    #[test]
    fn decode_metadata_input() {
        let input = classify(metadata()).unwrap();
        let (decoded, failures) =
            decode(&MetadataDecoder::default(), input, &DecoderConfig::default()).unwrap();
        assert!(failures.is_empty());
        let Decoded::Metadata(meta) = &decoded else {
            panic!("expected metadata");
        };
        assert!(render_summary(meta).contains("10 drops"));
        assert_eq!(decoded.to_json().unwrap()["TransactionResult"], json!("tesSUCCESS"));
    }

    #[test]
    fn renders_nodes_and_changes() {
        let node = MetadataDecoder::default()
            .decode_element(&account_root_modification())
            .unwrap();
        let line = render_node(&node);
        assert!(line.contains("AccountRoot"));
        assert!(line.contains("EC6AA554"));

        let AffectedNode::Modified(modified) = &node else {
            panic!("expected ModifiedNode");
        };
        let changes = field_changes(modified).unwrap().unwrap();
        let line = render_change(changes.get("Balance").unwrap());
        assert!(line.contains("Balance: \"29999999950\" -> \"29999999940\""));
    }

    #[test]
    fn catalog_lists_every_kind() {
        let rows = catalog_rows(&DecodabilityRegistry::global());
        assert_eq!(rows.len(), LedgerEntryType::ALL.len());
        assert!(rows.contains(&(LedgerEntryType::Offer, true)));
        assert!(rows.contains(&(LedgerEntryType::DirectoryNode, false)));
    }
}
