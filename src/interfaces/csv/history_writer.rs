use crate::application::session::TransferRow;
use crate::error::Result;
use std::io::Write;

/// Writes transfer history rows to a CSV sink.
pub struct HistoryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> HistoryWriter<W> {
    /// Creates a new `HistoryWriter` over any `Write` sink (e.g., File, Vec).
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(sink),
        }
    }

    pub fn write_rows(&mut self, rows: &[TransferRow]) -> Result<()> {
        self.writer.write_record([
            "transfer_id",
            "direction",
            "counterparty",
            "type",
            "status",
            "amount",
        ])?;
        for row in rows {
            self.writer.write_record([
                row.transfer_id.to_string(),
                row.direction.to_string(),
                row.counterparty.clone(),
                row.kind.to_string(),
                row.status.to_string(),
                row.amount.value().to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::Direction;
    use crate::domain::money::Amount;
    use crate::domain::transfer::{TransferKind, TransferStatus};
    use rust_decimal_macros::dec;

    #[test]
    fn test_writes_header_and_rows() {
        let rows = vec![
            TransferRow {
                transfer_id: 3001,
                direction: Direction::Outgoing,
                counterparty: "bob".to_string(),
                kind: TransferKind::Send,
                status: TransferStatus::Approved,
                amount: Amount::new(dec!(250.50)).unwrap(),
            },
            TransferRow {
                transfer_id: 3002,
                direction: Direction::Incoming,
                counterparty: "carol".to_string(),
                kind: TransferKind::Request,
                status: TransferStatus::Pending,
                amount: Amount::new(dec!(10.00)).unwrap(),
            },
        ];

        let mut writer = HistoryWriter::new(Vec::new());
        writer.write_rows(&rows).unwrap();
        let csv = String::from_utf8(writer.writer.into_inner().unwrap()).unwrap();

        assert_eq!(
            csv,
            "transfer_id,direction,counterparty,type,status,amount\n\
             3001,outgoing,bob,Send,Approved,250.50\n\
             3002,incoming,carol,Request,Pending,10.00\n"
        );
    }

    #[test]
    fn test_empty_history_still_writes_header() {
        let mut writer = HistoryWriter::new(Vec::new());
        writer.write_rows(&[]).unwrap();
        let csv = String::from_utf8(writer.writer.into_inner().unwrap()).unwrap();
        assert_eq!(csv, "transfer_id,direction,counterparty,type,status,amount\n");
    }
}
