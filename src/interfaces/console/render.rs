use crate::application::session::{Direction, TransferDetails, TransferRow};
use crate::domain::account::User;

const RULE: &str = "-------------------------------------------";

pub fn users_table(users: &[User]) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\nUsers\n");
    out.push_str(&format!("{:<12}{}\n", "ID", "Name"));
    out.push_str(RULE);
    for user in users {
        out.push_str(&format!("\n{:<12}{}", user.id, user.username));
    }
    out.push('\n');
    out.push_str(RULE);
    out
}

pub fn history_table(rows: &[TransferRow]) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\nTransfers\n");
    out.push_str(&format!("{:<12}{:<24}{}\n", "ID", "From/To", "Amount"));
    out.push_str(RULE);
    for row in rows {
        let counterparty = match row.direction {
            Direction::Outgoing => format!("To: {}", row.counterparty),
            Direction::Incoming => format!("From: {}", row.counterparty),
        };
        out.push_str(&format!(
            "\n{:<12}{:<24}{}",
            row.transfer_id, counterparty, row.amount
        ));
    }
    out.push('\n');
    out.push_str(RULE);
    out
}

pub fn pending_table(rows: &[TransferRow]) -> String {
    let mut out = String::new();
    out.push_str(RULE);
    out.push_str("\nPending Transfers\n");
    out.push_str(&format!("{:<12}{:<24}{}\n", "ID", "To", "Amount"));
    out.push_str(RULE);
    for row in rows {
        out.push_str(&format!(
            "\n{:<12}{:<24}{}",
            row.transfer_id, row.counterparty, row.amount
        ));
    }
    out.push('\n');
    out.push_str(RULE);
    out
}

pub fn details_block(details: &TransferDetails) -> String {
    format!(
        "{RULE}\nTransfer Details\n{RULE}\nId: {}\nFrom: {}\nTo: {}\nType: {}\nStatus: {}\nAmount: {}",
        details.transfer_id,
        details.from_username,
        details.to_username,
        details.kind,
        details.status,
        details.amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Amount;
    use crate::domain::transfer::{TransferKind, TransferStatus};
    use rust_decimal_macros::dec;

    fn row(direction: Direction) -> TransferRow {
        TransferRow {
            transfer_id: 3001,
            direction,
            counterparty: "bob".to_string(),
            kind: TransferKind::Send,
            status: TransferStatus::Approved,
            amount: Amount::new(dec!(250.50)).unwrap(),
        }
    }

    #[test]
    fn test_users_table_layout() {
        let users = vec![User {
            id: 1002,
            username: "bob".to_string(),
        }];
        let table = users_table(&users);
        assert!(table.contains("Users"));
        assert!(table.contains("1002        bob"));
    }

    #[test]
    fn test_history_table_marks_direction() {
        let outgoing = history_table(&[row(Direction::Outgoing)]);
        assert!(outgoing.contains("3001        To: bob                 $250.50"));

        let incoming = history_table(&[row(Direction::Incoming)]);
        assert!(incoming.contains("3001        From: bob               $250.50"));
    }

    #[test]
    fn test_pending_table_lists_counterparty() {
        let table = pending_table(&[row(Direction::Outgoing)]);
        assert!(table.contains("Pending Transfers"));
        assert!(table.contains("3001        bob                     $250.50"));
    }

    #[test]
    fn test_details_block_lists_every_field() {
        let details = TransferDetails {
            transfer_id: 3001,
            from_username: "alice".to_string(),
            to_username: "bob".to_string(),
            kind: TransferKind::Send,
            status: TransferStatus::Approved,
            amount: Amount::new(dec!(250.50)).unwrap(),
        };
        let block = details_block(&details);
        assert!(block.contains("Id: 3001"));
        assert!(block.contains("From: alice"));
        assert!(block.contains("To: bob"));
        assert!(block.contains("Type: Send"));
        assert!(block.contains("Status: Approved"));
        assert!(block.contains("Amount: $250.50"));
    }
}
