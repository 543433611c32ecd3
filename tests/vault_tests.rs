//! Integration tests for the signed and plain vaults over local storage.

use std::fs;
use std::thread;

use docvault::codec::PostcardCodec;
use docvault::storage::LocalStorage;
use docvault::{PlainVault, SignedVault, Vault, VaultError, VaultSecret};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RandomData {
    random_string: String,
    random_number: i32,
    random_date: String,
}

impl RandomData {
    fn generate() -> Self {
        let mut rng = rand::rng();
        let random_string = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(10)
            .map(char::from)
            .collect();
        Self {
            random_string,
            random_number: rng.random_range(18..=60),
            random_date: format!(
                "{:04}-{:02}-{:02}",
                rng.random_range(1..=2024),
                rng.random_range(1..=12),
                rng.random_range(1..=28)
            ),
        }
    }

    fn scenario() -> Self {
        Self {
            random_string: "abc123XYZ9".into(),
            random_number: 42,
            random_date: "2020-01-01".into(),
        }
    }
}

/// Helper: a signed vault rooted in a fresh temp dir.
fn signed_vault(secret: &str) -> (TempDir, SignedVault<LocalStorage>) {
    let dir = TempDir::new().expect("create temp dir");
    let vault = SignedVault::new(
        LocalStorage::new(dir.path()),
        VaultSecret::from_text(secret).expect("secret"),
    );
    (dir, vault)
}

fn reopen(dir: &TempDir, secret: &str) -> SignedVault<LocalStorage> {
    SignedVault::new(
        LocalStorage::new(dir.path()),
        VaultSecret::from_text(secret).expect("secret"),
    )
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn save_and_load_roundtrip() {
    let (_dir, vault) = signed_vault("mySecret");

    for i in 0..20 {
        let data = RandomData::generate();
        let name = format!("record-{i}");
        vault.save(&data, &name).expect("save");
        assert_eq!(vault.load::<RandomData>(&name).expect("load"), data);
    }
}

#[test]
fn roundtrip_across_vault_instances_with_same_secret() {
    let (dir, vault) = signed_vault("shared-secret");
    vault.save(&RandomData::scenario(), "scenario").unwrap();

    let other = reopen(&dir, "shared-secret");
    assert_eq!(
        other.load::<RandomData>("scenario").unwrap(),
        RandomData::scenario()
    );
}

#[test]
fn save_overwrites_previous_artifact() {
    let (_dir, vault) = signed_vault("s");
    let first = RandomData::generate();
    let second = RandomData {
        random_number: first.random_number + 1,
        ..first.clone()
    };

    vault.save(&first, "slot").unwrap();
    vault.save(&second, "slot").unwrap();
    assert_eq!(vault.load::<RandomData>("slot").unwrap(), second);
}

#[test]
fn nested_values_survive_roundtrip() {
    let (_dir, vault) = signed_vault("s");
    let data = serde_json::json!({
        "title": "quarterly",
        "tags": ["a", "b"],
        "meta": {"draft": false, "score": 9.5, "owner": null},
    });

    vault.save(&data, "nested").unwrap();
    assert_eq!(vault.load::<serde_json::Value>("nested").unwrap(), data);
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Readings {
    values: Vec<f64>,
}

#[test]
fn random_floats_survive_roundtrip() {
    let (_dir, vault) = signed_vault("mySecret");
    let mut rng = rand::rng();

    for batch in 0..4 {
        let values: Vec<f64> = (0..1000)
            .map(|i| {
                if i % 2 == 0 {
                    rng.random::<f64>()
                } else {
                    // Arbitrary bit patterns cover extreme exponents.
                    loop {
                        let v = f64::from_bits(rng.random::<u64>());
                        if v.is_finite() {
                            break v;
                        }
                    }
                }
            })
            .collect();
        let readings = Readings { values };

        let name = format!("floats-{batch}");
        vault.save(&readings, &name).unwrap();
        assert_eq!(vault.load::<Readings>(&name).unwrap(), readings);
    }
}

#[test]
fn wide_integer_survives_roundtrip() {
    let (_dir, vault) = signed_vault("mySecret");
    let data: serde_json::Value =
        serde_json::from_str(r#"{"n":18446744073709551616,"m":-99999999999999999999}"#).unwrap();

    vault.save(&data, "wide").unwrap();
    let loaded = vault.load::<serde_json::Value>("wide").unwrap();
    assert_eq!(
        serde_json::to_string(&loaded).unwrap(),
        r#"{"n":18446744073709551616,"m":-99999999999999999999}"#
    );
}

#[test]
fn externally_signed_wide_integer_loads() {
    let (dir, vault) = signed_vault("mySecret");
    let unsigned = br#"{"n":18446744073709551616}"#;
    let tag = docvault::crypto::sign(unsigned, b"mySecret").unwrap();
    fs::write(
        dir.path().join("wide.json"),
        format!(
            r#"{{"n":18446744073709551616,"signature":"{}"}}"#,
            docvault::crypto::encode_tag(&tag)
        ),
    )
    .unwrap();

    let loaded = vault.load::<serde_json::Value>("wide").unwrap();
    assert_eq!(loaded["n"].to_string(), "18446744073709551616");
}

// ---------------------------------------------------------------------------
// Concrete scenario
// ---------------------------------------------------------------------------

#[test]
fn scenario_artifact_layout_and_secret_check() {
    let (dir, vault) = signed_vault("mySecret");
    vault.save(&RandomData::scenario(), "scenario").unwrap();

    let stored = fs::read_to_string(dir.path().join("scenario.json")).unwrap();
    assert_eq!(
        stored,
        concat!(
            r#"{"randomString":"abc123XYZ9","randomNumber":42,"randomDate":"2020-01-01","#,
            r#""signature":"7B5ysLC4xx3PXbYEcYDjwbodZncm8ZqNu4jBsMeWWjo="}"#
        )
    );

    assert_eq!(
        vault.load::<RandomData>("scenario").unwrap(),
        RandomData::scenario()
    );

    let wrong = reopen(&dir, "wrongSecret");
    assert!(matches!(
        wrong.load::<RandomData>("scenario"),
        Err(VaultError::InvalidSignature)
    ));
}

// ---------------------------------------------------------------------------
// Tamper detection
// ---------------------------------------------------------------------------

#[test]
fn any_payload_byte_change_is_rejected() {
    let (dir, vault) = signed_vault("mySecret");
    vault.save(&RandomData::scenario(), "scenario").unwrap();

    let path = dir.path().join("scenario.json");
    let original = fs::read(&path).unwrap();
    let payload_end = String::from_utf8_lossy(&original)
        .find(",\"signature\"")
        .expect("signature field");

    for i in 0..payload_end {
        let mut tampered = original.clone();
        tampered[i] ^= 0x01;
        fs::write(&path, &tampered).unwrap();

        let err = vault.load::<RandomData>("scenario").unwrap_err();
        assert!(
            err.is_integrity_failure(),
            "byte {i} mutation must be rejected, got {err:?}"
        );
    }
}

#[test]
fn edited_value_fails_with_invalid_signature() {
    let (dir, vault) = signed_vault("mySecret");
    vault.save(&RandomData::scenario(), "scenario").unwrap();

    let path = dir.path().join("scenario.json");
    let edited = fs::read_to_string(&path)
        .unwrap()
        .replace("abc123XYZ9", "abc123XYZ8");
    fs::write(&path, edited).unwrap();

    assert!(matches!(
        vault.load::<RandomData>("scenario"),
        Err(VaultError::InvalidSignature)
    ));
}

#[test]
fn stripped_signature_fails() {
    let (dir, vault) = signed_vault("mySecret");
    fs::write(
        dir.path().join("unsigned.json"),
        br#"{"randomString":"abc123XYZ9","randomNumber":42,"randomDate":"2020-01-01"}"#,
    )
    .unwrap();

    assert!(matches!(
        vault.load::<RandomData>("unsigned"),
        Err(VaultError::InvalidSignature)
    ));
}

#[test]
fn garbage_artifact_is_malformed() {
    let (dir, vault) = signed_vault("mySecret");
    fs::write(dir.path().join("junk.json"), b"\x00\x01not json").unwrap();

    assert!(matches!(
        vault.load::<RandomData>("junk"),
        Err(VaultError::MalformedDocument(_))
    ));
}

// ---------------------------------------------------------------------------
// Missing artifacts and names
// ---------------------------------------------------------------------------

#[test]
fn load_missing_is_not_found() {
    let (_dir, vault) = signed_vault("mySecret");
    let err = vault.load::<RandomData>("nonexistent").unwrap_err();
    assert!(matches!(err, VaultError::NotFound(ref key) if key.ends_with("nonexistent.json")));
}

#[test]
fn name_with_extension_is_rejected() {
    let (_dir, vault) = signed_vault("mySecret");
    assert!(matches!(
        vault.save(&RandomData::scenario(), "testfile.json"),
        Err(VaultError::InvalidName(_))
    ));
    assert!(matches!(
        vault.load::<RandomData>(""),
        Err(VaultError::InvalidName(_))
    ));
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn parallel_saves_to_distinct_names() {
    let (_dir, vault) = signed_vault("mySecret");

    thread::scope(|scope| {
        for worker in 0..8 {
            let vault = &vault;
            scope.spawn(move || {
                for round in 0..10 {
                    let data = RandomData::generate();
                    let name = format!("w{worker}-r{round}");
                    vault.save(&data, &name).unwrap();
                    assert_eq!(vault.load::<RandomData>(&name).unwrap(), data);
                }
            });
        }
    });
}

#[test]
fn racing_saves_to_one_name_leave_a_valid_artifact() {
    let (dir, vault) = signed_vault("mySecret");
    let candidates: Vec<RandomData> = (0..8).map(|_| RandomData::generate()).collect();

    thread::scope(|scope| {
        for data in &candidates {
            let vault = &vault;
            scope.spawn(move || vault.save(data, "contended").unwrap());
        }
    });

    let winner = vault.load::<RandomData>("contended").unwrap();
    assert!(candidates.contains(&winner));

    // Only the artifact itself remains; no temp files linger.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

// ---------------------------------------------------------------------------
// Plain (binary) vault
// ---------------------------------------------------------------------------

#[test]
fn postcard_vault_roundtrip() {
    let dir = TempDir::new().unwrap();
    let vault = PlainVault::new(LocalStorage::new(dir.path()), PostcardCodec);
    let data = RandomData::generate();

    vault.save(&data, "binary").unwrap();
    assert!(dir.path().join("binary.bin").exists());
    assert_eq!(vault.load::<RandomData>("binary").unwrap(), data);
}
