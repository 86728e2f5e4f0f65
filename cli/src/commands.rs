//! Subcommand handlers.
//!
//! Each handler takes its parsed arguments plus the streams it may read
//! from or write to, so tests can drive them with in-memory buffers. Key
//! derivation runs on the blocking pool; everything else is cheap.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use vaultkeep_core::config::PARAMS_VERSION;
use vaultkeep_core::crypto::{generate_salt, open_with_password, seal_with_password};
use vaultkeep_core::encoding::{from_base64, to_base64};
use vaultkeep_core::gate::{create_check, verify, PasswordCheckRecord};
use vaultkeep_core::sharing::{combine, split, Share};
use vaultkeep_core::{EncryptedEnvelope, HashAlgorithm, KdfParams};

use crate::cli::{
    CheckCreateArgs, CheckVerifyArgs, CombineArgs, KdfArgs, OpenArgs, SealArgs, SplitArgs,
};

/// On-disk form of a password-check record: everything needed to verify a
/// password later except the password.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckFile {
    /// Base64 vault salt.
    pub salt: String,
    pub kdf: KdfParams,
    pub record: PasswordCheckRecord,
}

/// On-disk form of a sealed envelope. The salt lives inside the envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct SealedFile {
    pub kdf: KdfParams,
    pub envelope: EncryptedEnvelope,
}

/// Build the key-derivation parameters from a parameter file (if any) and
/// flag/env overrides on top.
pub fn resolve_kdf(args: &KdfArgs) -> Result<KdfParams> {
    let mut params = match &args.params {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read KDF parameters: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid KDF parameters in {}", path.display()))?
        }
        None => KdfParams::default(),
    };
    if let Some(iterations) = args.iterations {
        params.iterations = iterations;
    }
    if let Some(name) = &args.hash {
        params.hash = HashAlgorithm::from_name(name)
            .ok_or_else(|| anyhow!("unknown hash algorithm: {name}"))?;
    }
    ensure_supported(&params)?;
    Ok(params)
}

/// Parameter sets from another generation of defaults are a format error,
/// not a wrong password.
fn ensure_supported(params: &KdfParams) -> Result<()> {
    if !params.is_supported() {
        bail!(
            "unsupported KDF parameter version {} (this build reads version {})",
            params.version,
            PARAMS_VERSION
        );
    }
    Ok(())
}

/// Run a CPU-heavy closure (PBKDF2) off the async executor.
async fn blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("key derivation task failed")
}

fn read_all(input: Option<&Path>, stdin: impl Read) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match input {
        Some(path) => {
            buf = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
        }
    }
    Ok(buf)
}

fn emit(path: Option<&Path>, bytes: &[u8], out: &mut impl Write) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
        }
        None => out.write_all(bytes).context("failed to write output"),
    }
}

fn strip_newline(mut bytes: Vec<u8>) -> Vec<u8> {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    bytes
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut json = serde_json::to_vec_pretty(value).context("failed to serialize output")?;
    json.push(b'\n');
    Ok(json)
}

// ---------------------------------------------------------------------------
// Shares
// ---------------------------------------------------------------------------

/// `split`: one base64 share per output line. A single trailing newline on
/// stdin input is not part of the secret.
pub fn split_secret(args: &SplitArgs, stdin: impl Read, out: &mut impl Write) -> Result<()> {
    let raw = match &args.secret {
        Some(secret) => secret.as_bytes().to_vec(),
        None => strip_newline(read_all(None, stdin)?),
    };
    let secret = if args.hex {
        let text = std::str::from_utf8(&raw).context("hex secret is not valid UTF-8")?;
        hex::decode(text.trim()).context("secret is not valid hex")?
    } else {
        raw
    };

    let shares = split(&secret, args.shares, args.threshold)?;
    for share in &shares {
        writeln!(out, "{}", share.to_base64()).context("failed to write share")?;
    }

    info!(
        shares = args.shares,
        threshold = args.threshold,
        "secret split"
    );
    Ok(())
}

/// `combine`: shares from arguments, or from stdin one per line.
pub fn combine_shares(args: &CombineArgs, stdin: impl Read, out: &mut impl Write) -> Result<()> {
    let texts: Vec<String> = if args.shares.is_empty() {
        let input = read_all(None, stdin)?;
        String::from_utf8(input)
            .context("shares on stdin are not valid UTF-8")?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
    } else {
        args.shares.clone()
    };
    if texts.is_empty() {
        bail!("no shares supplied");
    }

    let shares = texts
        .iter()
        .enumerate()
        .map(|(n, text)| {
            Share::from_base64(text).with_context(|| format!("share #{} is not valid", n + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let secret = combine(&shares, args.threshold)?;
    info!(shares = shares.len(), "secret combined");

    if args.hex {
        writeln!(out, "{}", hex::encode(&secret)).context("failed to write secret")?;
        Ok(())
    } else {
        emit(None, &secret, out)
    }
}

// ---------------------------------------------------------------------------
// Password checks
// ---------------------------------------------------------------------------

/// `check create`
pub async fn create_check_file(args: CheckCreateArgs, out: &mut impl Write) -> Result<()> {
    let params = resolve_kdf(&args.kdf)?;
    let salt = match &args.salt {
        Some(text) => from_base64(text).context("salt is not valid base64")?,
        None => generate_salt().to_vec(),
    };

    let password = args.password.password;
    let record_salt = salt.clone();
    let record = blocking(move || create_check(&password, &record_salt, &params)).await??;

    let file = CheckFile {
        salt: to_base64(&salt),
        kdf: params,
        record,
    };
    emit(args.out.as_deref(), &to_pretty_json(&file)?, out)?;
    info!(iterations = params.iterations, "password check created");
    Ok(())
}

/// `check verify`: `Ok(true)` on a match, `Ok(false)` on anything else the
/// gate says no to. Only an unreadable file, or one written under another
/// parameter version, is an error.
pub async fn verify_check_file(args: CheckVerifyArgs) -> Result<bool> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file: CheckFile = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a check file", args.file.display()))?;
    ensure_supported(&file.kdf)
        .with_context(|| format!("cannot verify against {}", args.file.display()))?;

    let Ok(salt) = from_base64(&file.salt) else {
        return Ok(false);
    };
    let password = args.password.password;
    let matched = blocking(move || verify(&password, &salt, &file.record, &file.kdf)).await?;
    info!(matched, "password verified");
    Ok(matched)
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// `seal`
pub async fn seal(args: SealArgs, stdin: impl Read, out: &mut impl Write) -> Result<()> {
    let params = resolve_kdf(&args.kdf)?;
    let plaintext = read_all(args.input.as_deref(), stdin)?;
    let len = plaintext.len();

    let password = args.password.password;
    let envelope = blocking(move || seal_with_password(&password, &plaintext, &params)).await??;

    let file = SealedFile {
        kdf: params,
        envelope,
    };
    emit(args.out.as_deref(), &to_pretty_json(&file)?, out)?;
    info!(bytes = len, "payload sealed");
    Ok(())
}

/// `open`
pub async fn open(args: OpenArgs, out: &mut impl Write) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file: SealedFile = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a sealed envelope file", args.file.display()))?;
    ensure_supported(&file.kdf)
        .with_context(|| format!("cannot open {}", args.file.display()))?;

    let password = args.password.password;
    let plaintext = blocking(move || open_with_password(&password, &file.envelope, &file.kdf))
        .await?
        .context("could not open envelope")?;

    emit(args.out.as_deref(), &plaintext, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PasswordArgs;
    use std::io::Cursor;

    fn password(pw: &str) -> PasswordArgs {
        PasswordArgs {
            password: pw.to_string(),
        }
    }

    fn fast_kdf() -> KdfArgs {
        KdfArgs {
            iterations: Some(1_000),
            ..KdfArgs::default()
        }
    }

    fn split_args(secret: Option<&str>, hex: bool) -> SplitArgs {
        SplitArgs {
            shares: 5,
            threshold: 3,
            secret: secret.map(String::from),
            hex,
        }
    }

    #[test]
    fn split_then_combine_via_stdin() {
        let mut shares_out = Vec::new();
        split_secret(&split_args(None, false), Cursor::new(b"hello\n"), &mut shares_out).unwrap();

        let text = String::from_utf8(shares_out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);

        let picked = format!("{}\n\n{}\n{}\n", lines[4], lines[0], lines[2]);
        let combine_args = CombineArgs {
            shares: vec![],
            threshold: Some(3),
            hex: false,
        };
        let mut secret = Vec::new();
        combine_shares(&combine_args, Cursor::new(picked), &mut secret).unwrap();
        assert_eq!(secret, b"hello");
    }

    #[test]
    fn hex_secrets_roundtrip_as_hex() {
        let mut shares_out = Vec::new();
        split_secret(
            &split_args(Some("deadbeef"), true),
            Cursor::new(Vec::new()),
            &mut shares_out,
        )
        .unwrap();
        let text = String::from_utf8(shares_out).unwrap();

        let combine_args = CombineArgs {
            shares: text.lines().take(3).map(String::from).collect(),
            threshold: None,
            hex: true,
        };
        let mut out = Vec::new();
        combine_shares(&combine_args, Cursor::new(Vec::new()), &mut out).unwrap();
        assert_eq!(out, b"deadbeef\n");
    }

    #[test]
    fn bad_inputs_are_errors() {
        let bad_params = SplitArgs {
            shares: 2,
            threshold: 3,
            secret: Some("x".into()),
            hex: false,
        };
        assert!(split_secret(&bad_params, Cursor::new(Vec::new()), &mut Vec::new()).is_err());

        let garbage = CombineArgs {
            shares: vec!["@@@".into(), "AQI=".into()],
            threshold: None,
            hex: false,
        };
        let err = combine_shares(&garbage, Cursor::new(Vec::new()), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("share #1"));

        let nothing = CombineArgs {
            shares: vec![],
            threshold: None,
            hex: false,
        };
        assert!(combine_shares(&nothing, Cursor::new(b"\n\n".to_vec()), &mut Vec::new()).is_err());
    }

    #[test]
    fn kdf_resolution_layers_overrides_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kdf.json");
        fs::write(&path, r#"{"iterations": 50000, "hash": "sha512"}"#).unwrap();

        let from_file = resolve_kdf(&KdfArgs {
            params: Some(path.clone()),
            ..KdfArgs::default()
        })
        .unwrap();
        assert_eq!(from_file.iterations, 50_000);
        assert_eq!(from_file.hash, HashAlgorithm::Sha512);

        let overridden = resolve_kdf(&KdfArgs {
            params: Some(path),
            iterations: Some(7),
            hash: Some("sha256".into()),
        })
        .unwrap();
        assert_eq!(overridden.iterations, 7);
        assert_eq!(overridden.hash, HashAlgorithm::Sha256);

        assert_eq!(resolve_kdf(&KdfArgs::default()).unwrap(), KdfParams::default());
        assert!(resolve_kdf(&KdfArgs {
            hash: Some("md5".into()),
            ..KdfArgs::default()
        })
        .is_err());
    }

    #[test]
    fn kdf_files_from_other_generations_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kdf.json");
        fs::write(&path, r#"{"version": 99, "iterations": 1000}"#).unwrap();

        let err = resolve_kdf(&KdfArgs {
            params: Some(path),
            ..KdfArgs::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("unsupported KDF parameter version 99"));
    }

    #[tokio::test]
    async fn stored_files_from_other_generations_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let check = dir.path().join("check.json");
        let sealed = dir.path().join("note.sealed.json");

        create_check_file(
            CheckCreateArgs {
                password: password("pw"),
                kdf: fast_kdf(),
                salt: None,
                out: Some(check.clone()),
            },
            &mut Vec::new(),
        )
        .await
        .unwrap();
        seal(
            SealArgs {
                password: password("pw"),
                kdf: fast_kdf(),
                input: None,
                out: Some(sealed.clone()),
            },
            Cursor::new(b"payload".to_vec()),
            &mut Vec::new(),
        )
        .await
        .unwrap();

        for path in [&check, &sealed] {
            let mut value: serde_json::Value =
                serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
            value["kdf"]["version"] = serde_json::json!(99);
            fs::write(path, value.to_string()).unwrap();
        }

        let verify_err = verify_check_file(CheckVerifyArgs {
            password: password("pw"),
            file: check,
        })
        .await
        .unwrap_err();
        assert!(format!("{verify_err:#}").contains("unsupported KDF parameter version 99"));

        let open_err = open(
            OpenArgs {
                password: password("pw"),
                file: sealed,
                out: None,
            },
            &mut Vec::new(),
        )
        .await
        .unwrap_err();
        assert!(format!("{open_err:#}").contains("unsupported KDF parameter version 99"));
    }

    #[tokio::test]
    async fn check_file_create_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("check.json");

        create_check_file(
            CheckCreateArgs {
                password: password("correct-horse"),
                kdf: fast_kdf(),
                salt: None,
                out: Some(path.clone()),
            },
            &mut Vec::new(),
        )
        .await
        .unwrap();

        let verify_with = |pw: &str| CheckVerifyArgs {
            password: password(pw),
            file: path.clone(),
        };
        assert!(verify_check_file(verify_with("correct-horse")).await.unwrap());
        assert!(!verify_check_file(verify_with("wrong")).await.unwrap());
    }

    #[tokio::test]
    async fn check_file_keeps_supplied_salt() {
        let mut out = Vec::new();
        create_check_file(
            CheckCreateArgs {
                password: password("pw"),
                kdf: fast_kdf(),
                salt: Some("c2FsdHNhbHRzYWx0c2FsdA==".into()),
                out: None,
            },
            &mut out,
        )
        .await
        .unwrap();

        let file: CheckFile = serde_json::from_slice(&out).unwrap();
        assert_eq!(file.salt, "c2FsdHNhbHRzYWx0c2FsdA==");
        assert_eq!(file.kdf.iterations, 1_000);
    }

    #[tokio::test]
    async fn seal_and_open_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let sealed = dir.path().join("note.sealed.json");

        seal(
            SealArgs {
                password: password("pw"),
                kdf: fast_kdf(),
                input: None,
                out: Some(sealed.clone()),
            },
            Cursor::new(b"meet at noon".to_vec()),
            &mut Vec::new(),
        )
        .await
        .unwrap();

        let mut plaintext = Vec::new();
        open(
            OpenArgs {
                password: password("pw"),
                file: sealed.clone(),
                out: None,
            },
            &mut plaintext,
        )
        .await
        .unwrap();
        assert_eq!(plaintext, b"meet at noon");

        let wrong = open(
            OpenArgs {
                password: password("not-pw"),
                file: sealed,
                out: None,
            },
            &mut Vec::new(),
        )
        .await;
        assert!(wrong.is_err());
    }
}
