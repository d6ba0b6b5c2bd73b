use crate::common::parse_peer_asn;
use clap::Parser;
use std::path::PathBuf;

/// CLIの定義
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "This tool verifies BGP AS_PATHs against ASPA records."
)]
pub struct Cli {
    #[arg(
        short = 'A',
        long = "aspa",
        help = "ASPA records exported by an RPKI validator (JSON).\nExample: aspas.json"
    )]
    pub aspa_file: PathBuf,

    #[arg(
        short = 'p',
        long = "path",
        required_unless_present = "input",
        conflicts_with = "input",
        requires = "neighbor",
        help = "AS_PATH as received, neighbor first.\nExample: \"3356 12389 {64500,64501}\""
    )]
    pub as_path: Option<String>,

    #[arg(
        short = 'n',
        long = "neighbor",
        value_parser = parse_peer_asn,
        help = "ASN of the neighbor the route was received from.\nExample: 3356 or AS3356"
    )]
    pub neighbor: Option<u32>,

    #[arg(
        long = "afi",
        default_value = "ipv4",
        hide_default_value = true,
        help = "Address family for --path: 'ipv4' or 'ipv6'.\ndefault: ipv4"
    )]
    pub afi: String,

    #[arg(
        short = 'i',
        long = "input",
        required_unless_present = "as_path",
        help = "Route list to verify, one 'prefix|neighbor|as_path' per line."
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "direction",
        default_value = "downstream",
        hide_default_value = true,
        help = "Select verification: 'upstream', 'downstream' or 'ix'.\ndefault: downstream"
    )]
    pub direction: String,

    #[arg(
        short = 'f',
        long = "format",
        default_value = "txt",
        hide_default_value = true,
        help = "Select output format: 'txt' or 'json'.\ndefault: txt"
    )]
    pub output_format: String,

    #[arg(
        short = 'o',
        long = "output",
        help = "Write the report to this file instead of stdout."
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'm',
        long = "mode",
        default_value = "overwrite",
        hide_default_value = true,
        help = "Select file output mode: 'append' or 'overwrite'.\ndefault: overwrite"
    )]
    pub mode: String,

    #[arg(
        long = "concurrency",
        default_value_t = crate::constants::DEFAULT_CONCURRENCY,
        help = "Number of verification tasks running at once."
    )]
    pub concurrency: usize,
}
