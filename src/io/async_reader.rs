//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading over dashboard records from any async byte source.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures' `AsyncRead` so tokio files plug in through `tokio-util` compat
//! - Batch reading so a source can be drained in bounded steps
//!
//! ```text
//! CSV source → AsyncReader → Batches of records
//!                  ↓
//!           csv_format module
//!           (row structs, FromCsvRow)
//! ```

use crate::io::csv_format::FromCsvRow;
use crate::types::DashboardError;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use std::marker::PhantomData;
use tracing::warn;

/// Asynchronous CSV reader yielding records of type `T`
pub struct AsyncReader<R: AsyncRead + Unpin, T> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: u64,
    _record: PhantomData<fn() -> T>,
}

impl<R, T> AsyncReader<R, T>
where
    R: AsyncRead + Unpin + Send + 'static,
    T: FromCsvRow,
{
    /// Create a new AsyncReader over an async byte source
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 1,
            _record: PhantomData,
        }
    }

    /// Read up to `batch_size` records
    ///
    /// Malformed rows are logged with their line number and skipped. Returns
    /// an empty vector once the source is exhausted, and an error if the
    /// source itself can no longer be read.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<T>, DashboardError> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut rows = self.csv_reader.deserialize::<T::Row>();

        while batch.len() < batch_size {
            let Some(result) = rows.next().await else {
                break;
            };
            self.line_num += 1;

            let converted = match result {
                Ok(row) => T::from_csv_row(row),
                Err(e) => Err(DashboardError::from(e)),
            };
            match converted {
                Ok(record) => batch.push(record),
                Err(e) if e.is_recoverable() => {
                    let error = e.at_line(self.line_num);
                    warn!(error = %error, "skipping malformed row");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dispute, LastActionKind, Transaction};
    use futures::io::Cursor;
    use rust_decimal::Decimal;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Byte source whose reads always fail
    struct BrokenSource;

    impl AsyncRead for BrokenSource {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut [u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection lost")))
        }
    }

    const HEADER: &str = "id,amount,currency,buyer,seller,status\n";

    fn reader(content: String) -> AsyncReader<Cursor<Vec<u8>>, Transaction> {
        AsyncReader::new(Cursor::new(content.into_bytes()))
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let mut async_reader = reader(format!(
            "{}TXN1,1.5,ETH,A,B,Funds Locked\nTXN2,500,USDC,C,D,Fulfilled\nTXN3,0.8,BTC,E,F,Refunded\n",
            HEADER
        ));

        let batch = async_reader.read_batch(2).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, "TXN1");
        assert_eq!(batch[0].amount.value, Decimal::new(15, 1));
        assert_eq!(batch[1].id, "TXN2");

        let batch = async_reader.read_batch(2).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "TXN3");

        assert!(async_reader.read_batch(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut async_reader = reader(HEADER.to_string());
        assert!(async_reader.read_batch(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_rows() {
        let mut async_reader = reader(format!(
            "{}TXN1,abc,ETH,A,B,Fulfilled\nTXN2,1,ETH,A,B,Fulfilled\n,1,ETH,A,B,Fulfilled\n",
            HEADER
        ));

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "TXN2");
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_handling() {
        let mut async_reader = reader(format!("{}  TXN1 , 2.0 , ETH , A , B , Disputed \n", HEADER));

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "TXN1");
        assert_eq!(batch[0].status, "Disputed");
    }

    #[tokio::test]
    async fn test_async_reader_disputes() {
        let content = "id,amount,currency,buyer,buyer_address,seller,seller_address,status,priority,decision_expected,last_action,last_action_by\n\
                       TXN78895,750,USDC,Mike P.,,Sarah Q.,,Awaiting Response,Medium Priority,Within 5 days,Dispute filed,seller\n";
        let mut async_reader: AsyncReader<_, Dispute> =
            AsyncReader::new(Cursor::new(content.as_bytes().to_vec()));

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(
            batch[0].last_action.map(|action| action.kind),
            Some(LastActionKind::DisputeFiled)
        );
    }

    #[tokio::test]
    async fn test_async_reader_reports_read_failure() {
        let mut async_reader: AsyncReader<_, Transaction> = AsyncReader::new(BrokenSource);

        let result = async_reader.read_batch(10).await;
        assert!(matches!(result, Err(DashboardError::IoError { .. })));
    }
}
