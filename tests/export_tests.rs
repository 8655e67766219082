use predicates::prelude::*;

mod common;
use common::{script, tebucks_offline};

#[test]
fn test_history_export_writes_csv() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("history.csv");
    let path_str = path.to_str().expect("utf-8 temp path");

    let mut cmd = tebucks_offline();
    cmd.write_stdin(script(&[
        "1", "alice", "hunter2", //
        "1", "bob", "hunter2", //
        "2", "alice", "hunter2", //
        "4", "1002", "250.50", //
        "6", path_str, // export
        "0", "0",
    ]));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transfers to"));

    let csv = std::fs::read_to_string(&path)?;
    assert_eq!(
        csv,
        "transfer_id,direction,counterparty,type,status,amount\n\
         3001,outgoing,bob,Send,Approved,250.50\n"
    );

    Ok(())
}

#[test]
fn test_export_with_no_history_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("empty.csv");

    let mut cmd = tebucks_offline();
    cmd.write_stdin(script(&[
        "1", "alice", "hunter2", //
        "2", "alice", "hunter2", //
        "6", // nothing to export; no path is even asked for
        "0", "0",
    ]));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No transfer history to export."));

    assert!(!path.exists());

    Ok(())
}
