//! dnacrypt CLI: encode JSON records into tamper-evident DNA and back
//!
//! Commands:
//!   dnacrypt encode  <json | @file>     encode a record
//!   dnacrypt decode  <payload> <seed>   decode and verify a payload
//!   dnacrypt keygen                     print fresh secrets as env lines
//!   dnacrypt demo                       encode, decode, then tamper
//!
//! Secrets come from AES_KEY / DNA_SECRET_KEY / LOGISTIC_MAP_R, or from a
//! JSON file given with `--config <file>`.

use dnacrypt_core::pipeline::{DecodeResponse, EncodeResponse, VerificationStatus};
use dnacrypt_core::{DnaCryptEngine, EngineConfig, Verification};
use serde_json::{json, Value};
use std::env;
use std::process;

/// Exit status when a payload fails verification
const EXIT_TAMPERED: i32 = 2;

fn print_usage() {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║        dnacrypt v0.1 - Tamper-Evident DNA Encoding           ║
║        AES-256-CBC + Logistic Map + Watson-Crick Scramble    ║
╚══════════════════════════════════════════════════════════════╝

Usage: dnacrypt [--config <file>] <command> [options]

Commands:
  encode  <json | @file>      Encode a JSON object into a DNA payload
  decode  <payload> <seed>    Decode a payload and verify its integrity
  keygen                      Print fresh AES_KEY / DNA_SECRET_KEY lines
  demo                        Encode, decode and tamper with a sample record

Environment:
  AES_KEY          base64 of 32 bytes
  DNA_SECRET_KEY   256 characters of A/C/G/T
  LOGISTIC_MAP_R   chaos parameter in (3.57, 4.0], default 3.99

Examples:
  dnacrypt keygen > .env
  dnacrypt encode '{{"student":"Ada","grade":"A+"}}'
  dnacrypt encode @certificate.json
  dnacrypt decode GATTACA... 0.2658
"#
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let config_path = take_config_flag(&mut args);
    if args.is_empty() {
        print_usage();
        return;
    }

    let code = match args[0].as_str() {
        "encode" => cmd_encode(&args[1..], config_path.as_deref()),
        "decode" => cmd_decode(&args[1..], config_path.as_deref()),
        "keygen" => cmd_keygen(),
        "demo" => cmd_demo(),
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            1
        }
    };
    process::exit(code);
}

/// Remove `--config <file>` from the argument list, returning the path
fn take_config_flag(args: &mut Vec<String>) -> Option<String> {
    let pos = args.iter().position(|a| a == "--config")?;
    if pos + 1 >= args.len() {
        args.remove(pos);
        return None;
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    Some(path)
}

/// Build the engine from `--config` or the environment
fn load_engine(config_path: Option<&str>) -> Option<DnaCryptEngine> {
    let config = match config_path {
        Some(path) => EngineConfig::load(path),
        None => EngineConfig::from_env(),
    };
    match config {
        Ok(config) => Some(DnaCryptEngine::new(config)),
        Err(e) => {
            eprintln!("  Configuration error: {}", e);
            eprintln!("  Run 'dnacrypt keygen' to create secrets.");
            None
        }
    }
}

/// Inline JSON, or `@path` to read it from a file
fn read_record(arg: &str) -> Result<Value, String> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path, e))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text).map_err(|e| format!("invalid JSON: {}", e))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("  Failed to serialize output: {}", e),
    }
}

fn cmd_encode(args: &[String], config_path: Option<&str>) -> i32 {
    if args.is_empty() {
        eprintln!("Usage: dnacrypt encode <json | @file>");
        return 1;
    }
    let record = match read_record(&args[0]) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("  {}", e);
            return 1;
        }
    };
    let Some(engine) = load_engine(config_path) else {
        return 1;
    };
    match engine.encode(&record) {
        Ok(encoded) => {
            print_json(&EncodeResponse::from(encoded));
            0
        }
        Err(e) => {
            eprintln!("  Encoding failed: {}", e);
            1
        }
    }
}

fn cmd_decode(args: &[String], config_path: Option<&str>) -> i32 {
    if args.len() < 2 {
        eprintln!("Usage: dnacrypt decode <payload> <seed>");
        return 1;
    }
    let Some(engine) = load_engine(config_path) else {
        return 1;
    };
    match engine.decode(&args[0], &args[1]) {
        Ok(verification) => {
            let response = DecodeResponse::from_verification(verification);
            print_json(&response);
            match response.status {
                VerificationStatus::Authentic => 0,
                VerificationStatus::Tampered => EXIT_TAMPERED,
            }
        }
        Err(e) => {
            eprintln!("  Decoding failed: {}", e);
            1
        }
    }
}

fn cmd_keygen() -> i32 {
    print!("{}", EngineConfig::generate().to_env_lines());
    0
}

fn cmd_demo() -> i32 {
    println!(
        r#"
╔══════════════════════════════════════════════════════════════╗
║              dnacrypt v0.1 - Full Demo                       ║
║        Encode -> Decode -> Tamper -> Detect                  ║
╚══════════════════════════════════════════════════════════════╝
"#
    );

    println!("Step 1: Generating ephemeral secrets...");
    println!("{}", "-".repeat(60));
    let engine = DnaCryptEngine::new(EngineConfig::generate());
    println!("  AES-256 key + 256-nucleotide key stream, r = 3.99");

    println!("\nStep 2: Encoding a certificate record...");
    println!("{}", "-".repeat(60));
    let record = json!({
        "certificate_id": "CERT-2026-0042",
        "student_name": "Ada Lovelace",
        "course": "Analytical Engines",
        "grade": "A+",
        "issued_at": "2026-10-19"
    });
    let encoded = match engine.encode(&record) {
        Ok(encoded) => encoded,
        Err(e) => {
            eprintln!("  Encoding failed: {}", e);
            return 1;
        }
    };
    let preview: String = encoded.payload.chars().take(48).collect();
    println!("  payload: {}... ({} nucleotides)", preview, encoded.payload.len());
    println!("  seed:    {}", encoded.seed);

    println!("\nStep 3: Decoding the untouched payload...");
    println!("{}", "-".repeat(60));
    match engine.decode(&encoded.payload, &encoded.seed) {
        Ok(Verification::Authentic(data)) => {
            println!("  AUTHENTIC: {}", Value::Object(data));
        }
        Ok(Verification::Tampered) => {
            eprintln!("  Unexpected: untouched payload reported as tampered");
            return 1;
        }
        Err(e) => {
            eprintln!("  Decoding failed: {}", e);
            return 1;
        }
    }

    println!("\nStep 4: Flipping one nucleotide and decoding again...");
    println!("{}", "-".repeat(60));
    let position = encoded.payload.len() / 2;
    let mut tampered: Vec<char> = encoded.payload.chars().collect();
    tampered[position] = if tampered[position] == 'A' { 'C' } else { 'A' };
    let tampered: String = tampered.into_iter().collect();
    match engine.decode(&tampered, &encoded.seed) {
        Ok(Verification::Tampered) => println!("  TAMPERED: change at position {} detected", position),
        Ok(Verification::Authentic(_)) => {
            eprintln!("  Unexpected: modified payload verified as authentic");
            return 1;
        }
        Err(e) => {
            eprintln!("  Decoding failed: {}", e);
            return 1;
        }
    }

    println!("\nDemo complete.");
    0
}
