#![allow(dead_code)]

use pca9685_rgb::{Transport, TransportError};

/// One closed bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub(crate) address: u8,
    pub(crate) bytes: Vec<u8>,
}

impl Transaction {
    /// Register the transaction starts at
    pub(crate) fn register(&self) -> u8 {
        self.bytes[0]
    }

    /// Data bytes after the start register
    pub(crate) fn payload(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Payload decoded as `(on, off)` tick pairs
    pub(crate) fn pairs(&self) -> Vec<(u16, u16)> {
        self.payload()
            .chunks(4)
            .map(|chunk| {
                (
                    u16::from_le_bytes([chunk[0], chunk[1]]),
                    u16::from_le_bytes([chunk[2], chunk[3]]),
                )
            })
            .collect()
    }
}

/// Transport that records every transaction and can be told to fail
#[derive(Debug, Default)]
pub(crate) struct RecordingTransport {
    pub(crate) transactions: Vec<Transaction>,
    open: Option<Transaction>,
    /// Fail the transaction with this index (0-based)
    pub(crate) fail_at: Option<usize>,
}

impl RecordingTransport {
    pub(crate) fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }
}

impl Transport for RecordingTransport {
    fn begin(&mut self, address: u8) {
        assert!(self.open.is_none(), "begin inside an open transaction");
        self.open = Some(Transaction {
            address,
            bytes: Vec::new(),
        });
    }

    fn write(&mut self, byte: u8) {
        self.open
            .as_mut()
            .expect("write outside a transaction")
            .bytes
            .push(byte);
    }

    fn end(&mut self) -> Result<(), TransportError> {
        let transaction = self.open.take().expect("end without begin");
        if self.fail_at == Some(self.transactions.len()) {
            self.fail_at = None;
            return Err(TransportError::NoAcknowledge);
        }
        self.transactions.push(transaction);
        Ok(())
    }
}
