mod rows_stream;

pub use rows_stream::RowsStream;
