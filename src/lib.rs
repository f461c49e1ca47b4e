pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod search;
pub mod store;
pub mod transport;

use dristi_common::ApiClient;

/// CLIで使う具体的なクライアント
pub type CliClient = ApiClient<transport::ReqwestTransport, store::FileStore, transport::TerminalNavigator>;
