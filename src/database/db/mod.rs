pub mod connection;
pub mod migrate;
pub mod queries;
pub mod queries_postgre;
