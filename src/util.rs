use tokio::sync::broadcast;

#[derive(Clone)]
pub struct Shutdown(broadcast::Sender<()>);

impl Shutdown {
    pub fn new() -> Shutdown {
        let (sender, _) = broadcast::channel(1);
        Shutdown(sender)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.0.subscribe()
    }

    pub fn shutdown(&self) {
        // nobody listening is fine, there is nothing left to stop
        let _ = self.0.send(());
    }
}

/// Escapes backticks so user input can't break out of inline code blocks.
pub fn escape_backticks(text: &str) -> String {
    text.replace('`', "\\`")
}
