use predicates::prelude::*;

mod common;
use common::{script, tebucks_offline};

#[test]
fn test_request_then_approve_settles_funds() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = tebucks_offline();
    cmd.write_stdin(script(&[
        "1", "alice", "hunter2", //
        "1", "bob", "hunter2", //
        "2", "alice", "hunter2", //
        "5", "1002", "300.00", // request from bob
        "3", // nothing for alice to decide
        "0", // log out
        "2", "bob", "hunter2", //
        "3", "3001", "1", // approve the request
        "1", // bob's balance
        "0", // log out
        "2", "alice", "hunter2", //
        "1", // alice's balance
        "0", "0",
    ]));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Request sent successfully."))
        .stdout(predicate::str::contains("No pending requests."))
        .stdout(predicate::str::contains("Pending Transfers"))
        .stdout(predicate::str::contains("Transfer Approved!"))
        .stdout(predicate::str::contains(
            "Your current account balance is: $700.00",
        ))
        .stdout(predicate::str::contains(
            "Your current account balance is: $1300.00",
        ));

    Ok(())
}

#[test]
fn test_rejected_request_moves_no_funds() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = tebucks_offline();
    cmd.write_stdin(script(&[
        "1", "alice", "hunter2", //
        "1", "bob", "hunter2", //
        "2", "alice", "hunter2", //
        "5", "1002", "300.00", //
        "0", // log out
        "2", "bob", "hunter2", //
        "3", "3001", "2", // reject the request
        "1", // still $1000.00
        "0", // log out
        "2", "alice", "hunter2", //
        "2", "3001", // history shows the rejected transfer
        "0", "0",
    ]));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Transfer Rejected!"))
        .stdout(predicate::str::contains(
            "Your current account balance is: $1000.00",
        ))
        .stdout(predicate::str::contains("Status: Rejected"));

    Ok(())
}

#[test]
fn test_approval_fails_when_payer_cannot_cover() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = tebucks_offline();
    cmd.write_stdin(script(&[
        "1", "alice", "hunter2", //
        "1", "bob", "hunter2", //
        "1", "carol", "hunter2", //
        "2", "alice", "hunter2", //
        "5", "1002", "900.00", // ask bob for 900
        "0", // log out
        "2", "bob", "hunter2", //
        "4", "1003", "500.00", // bob drains his account first
        "3", "3001", "1", // approval fails, request stays pending
        "3001", "2", // reject it instead
        "0", "0",
    ]));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Could not approve transfer"))
        .stdout(predicate::str::contains("insufficient funds"))
        .stdout(predicate::str::contains("Transfer Rejected!"));

    Ok(())
}

#[test]
fn test_unlisted_transfer_id_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = tebucks_offline();
    cmd.write_stdin(script(&[
        "1", "alice", "hunter2", //
        "1", "bob", "hunter2", //
        "2", "alice", "hunter2", //
        "5", "1002", "300.00", //
        "0", //
        "2", "bob", "hunter2", //
        "3", "9999", // not in the pending list
        "3001", "2", //
        "0", "0",
    ]));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Invalid transfer ID, please try again."))
        .stdout(predicate::str::contains("Transfer Rejected!"));

    Ok(())
}
