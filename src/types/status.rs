/// Link state events reported by the bench worker
#[derive(Clone, Debug)]
pub enum LinkStatus {
    Connected { port: String },
    Disconnected,
    /// A benign notice for the status line, e.g. after zeroing
    Notice(String),
    Error(String),
}
