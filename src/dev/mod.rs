/// Development utilities module
///
/// Test doubles and offline data for running the bot without the network.
pub mod mock_client;
