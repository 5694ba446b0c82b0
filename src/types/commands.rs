/// Command enumeration for the bench worker thread
#[derive(Clone, Debug)]
pub enum BenchCommand {
    /// Open the named serial port and perform the controller handshake
    Connect { port: String },
    /// Adopt the current raw encoder position as the new zero offset
    ZeroEncoder,
    /// Close the serial link
    Disconnect,
}
