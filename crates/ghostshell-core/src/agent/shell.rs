//! The Shell: channel routing in front of a [`Ghost`].
//!
//! Inbound messages pass through the input port registered for their
//! channel, then through the shell-wide enhancer chain, before they are
//! recorded and sent to the ghost. An unknown channel is not an error; it
//! is treated as a port with an empty chain.

use std::collections::HashMap;

use ghostshell_types::error::{ShellError, TransformError};
use ghostshell_types::llm::{CompletionResult, Message};

use crate::pipeline::{InputPort, OutputPort, Transformer, TransformerChain};

use super::ghost::Ghost;

/// Channel used when the caller does not name one.
pub const DEFAULT_CHANNEL: &str = "default";

/// Routes messages through named ports and delegates completion to a [`Ghost`].
#[derive(Debug)]
pub struct Shell {
    ghost: Ghost,
    input_ports: HashMap<String, InputPort>,
    output_ports: HashMap<String, OutputPort>,
    context_enhancers: TransformerChain<Message>,
}

impl Shell {
    pub fn new(ghost: Ghost) -> Self {
        Self {
            ghost,
            input_ports: HashMap::new(),
            output_ports: HashMap::new(),
            context_enhancers: TransformerChain::new(),
        }
    }

    pub fn ghost(&self) -> &Ghost {
        &self.ghost
    }

    pub fn ghost_mut(&mut self) -> &mut Ghost {
        &mut self.ghost
    }

    /// Register an input port under its own name, replacing any previous one.
    pub fn add_input_port(&mut self, port: InputPort) {
        self.input_ports.insert(port.name().to_string(), port);
    }

    /// Register an output port under its own name, replacing any previous one.
    pub fn add_output_port(&mut self, port: OutputPort) {
        self.output_ports.insert(port.name().to_string(), port);
    }

    /// Append an enhancer that runs on every inbound message, on every channel.
    pub fn add_context_enhancer(&mut self, enhancer: impl Transformer<Message> + 'static) {
        self.context_enhancers.register(enhancer);
    }

    pub fn input_channels(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.input_ports.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn enhancer_names(&self) -> Vec<&str> {
        self.context_enhancers.names()
    }

    /// Route `message` through `channel`, record it, and complete.
    ///
    /// On success history has grown by exactly two entries: the transformed
    /// message and the assistant reply. A transformer failure leaves history
    /// untouched. A completion failure leaves the transformed message
    /// recorded with no reply after it.
    pub async fn process_input(
        &mut self,
        message: Message,
        channel: &str,
    ) -> Result<CompletionResult, ShellError> {
        let prepared = self.prepare_input(message, channel)?;
        self.ghost.add_message(prepared);
        let result = self.ghost.process(None).await?;
        self.record_reply(&result);
        Ok(result)
    }

    /// Blocking form of [`Shell::process_input`]. Same steps, same history.
    pub fn process_input_blocking(
        &mut self,
        message: Message,
        channel: &str,
    ) -> Result<CompletionResult, ShellError> {
        let prepared = self.prepare_input(message, channel)?;
        self.ghost.add_message(prepared);
        let result = self.ghost.process_blocking(None)?;
        self.record_reply(&result);
        Ok(result)
    }

    /// Run `result` through the output port for `channel`.
    ///
    /// Never called by `process_input`; post-processing is up to the caller.
    pub fn process_output(
        &self,
        result: CompletionResult,
        channel: &str,
    ) -> Result<CompletionResult, TransformError> {
        match self.output_ports.get(channel) {
            Some(port) => port.process(result),
            None => {
                tracing::debug!(channel, "no output port registered, passing result through");
                Ok(result)
            }
        }
    }

    fn prepare_input(&self, message: Message, channel: &str) -> Result<Message, TransformError> {
        let routed = match self.input_ports.get(channel) {
            Some(port) => port.process(message)?,
            None => {
                tracing::debug!(channel, "no input port registered, using empty chain");
                message
            }
        };
        self.context_enhancers.apply(routed)
    }

    fn record_reply(&mut self, result: &CompletionResult) {
        self.ghost
            .add_message(Message::assistant(result.content.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::box_provider::BoxLlmProvider;
    use crate::llm::testing::StubProvider;
    use crate::pipeline::FnTransformer;
    use ghostshell_types::llm::{FinishReason, LlmError};

    fn shell_replying(content: &str) -> Shell {
        Shell::new(Ghost::new(BoxLlmProvider::new(StubProvider::replying(
            content,
        ))))
    }

    fn uppercase_port(name: &str) -> InputPort {
        InputPort::new(name).with_fn("uppercase", |mut m: Message| {
            m.content = m.content.to_uppercase();
            m
        })
    }

    #[tokio::test]
    async fn test_uppercase_channel_end_to_end() {
        let mut shell = shell_replying("HI-ECHO");
        shell.add_input_port(uppercase_port("shout"));

        let result = shell
            .process_input(Message::user("hi"), "shout")
            .await
            .unwrap();

        assert_eq!(result.content, "HI-ECHO");
        assert_eq!(result.finish_reason, FinishReason::Stop);
        assert_eq!(
            shell.ghost().history(),
            vec![Message::user("HI"), Message::assistant("HI-ECHO")]
        );
    }

    #[tokio::test]
    async fn test_unregistered_channel_is_identity() {
        let mut shell = shell_replying("ok");
        shell.add_input_port(uppercase_port("shout"));

        shell
            .process_input(Message::user("quiet please"), "unregistered")
            .await
            .unwrap();

        assert_eq!(shell.ghost().history()[0], Message::user("quiet please"));
    }

    #[tokio::test]
    async fn test_each_call_appends_two_messages() {
        let mut shell = shell_replying("reply");
        for turn in 1..=3 {
            shell
                .process_input(Message::user(format!("turn {turn}")), DEFAULT_CHANNEL)
                .await
                .unwrap();
            assert_eq!(shell.ghost().history().len(), turn * 2);
        }
        let history = shell.ghost().history();
        assert_eq!(history[4], Message::user("turn 3"));
        assert_eq!(history[5], Message::assistant("reply"));
    }

    #[tokio::test]
    async fn test_provider_sees_transformed_history() {
        let stub = StubProvider::replying("ok");
        let calls = stub.calls();
        let mut shell = Shell::new(Ghost::new(BoxLlmProvider::new(stub)));
        shell.add_input_port(uppercase_port(DEFAULT_CHANNEL));

        shell
            .process_input(Message::user("first"), DEFAULT_CHANNEL)
            .await
            .unwrap();
        shell
            .process_input(Message::user("second"), DEFAULT_CHANNEL)
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].messages, vec![Message::user("FIRST")]);
        assert_eq!(
            calls[1].messages,
            vec![
                Message::user("FIRST"),
                Message::assistant("ok"),
                Message::user("SECOND"),
            ]
        );
    }

    #[tokio::test]
    async fn test_enhancers_run_after_port_on_every_channel() {
        let mut shell = shell_replying("ok");
        shell.add_input_port(uppercase_port("shout"));
        shell.add_context_enhancer(FnTransformer::new("tag", |mut m: Message| {
            m.content.push_str(" [ctx]");
            Ok::<_, TransformError>(m)
        }));

        shell
            .process_input(Message::user("a"), "shout")
            .await
            .unwrap();
        shell
            .process_input(Message::user("b"), "other")
            .await
            .unwrap();

        let history = shell.ghost().history();
        assert_eq!(history[0].content, "A [ctx]");
        assert_eq!(history[2].content, "b [ctx]");
        assert_eq!(shell.enhancer_names(), vec!["tag"]);
    }

    #[tokio::test]
    async fn test_transform_failure_leaves_history_untouched() {
        let stub = StubProvider::replying("never");
        let calls = stub.calls();
        let mut shell = Shell::new(Ghost::new(BoxLlmProvider::new(stub)));
        shell.add_input_port(InputPort::new("strict").with_try_fn("reject", |_m: Message| {
            Err(TransformError::new("reject", "empty payload"))
        }));

        let err = shell
            .process_input(Message::user(""), "strict")
            .await
            .unwrap_err();

        match err {
            ShellError::Transform(e) => assert_eq!(e.transformer, "reject"),
            other => panic!("expected transform error, got {other:?}"),
        }
        assert!(shell.ghost().history().is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_completion_failure_keeps_user_message() {
        let mut shell = Shell::new(Ghost::new(BoxLlmProvider::new(StubProvider::failing())));

        let err = shell
            .process_input(Message::user("hello"), DEFAULT_CHANNEL)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ShellError::Completion(LlmError::AuthenticationFailed)
        ));
        assert_eq!(shell.ghost().history(), vec![Message::user("hello")]);
    }

    #[tokio::test]
    async fn test_process_output_is_opt_in() {
        let mut shell = shell_replying("  padded  ");
        shell.add_output_port(OutputPort::new(DEFAULT_CHANNEL).with_fn(
            "trim",
            |mut r: CompletionResult| {
                r.content = r.content.trim().to_string();
                r
            },
        ));

        let raw = shell
            .process_input(Message::user("x"), DEFAULT_CHANNEL)
            .await
            .unwrap();
        assert_eq!(raw.content, "  padded  ");
        assert_eq!(shell.ghost().history()[1].content, "  padded  ");

        let shaped = shell.process_output(raw.clone(), DEFAULT_CHANNEL).unwrap();
        assert_eq!(shaped.content, "padded");

        let untouched = shell.process_output(raw.clone(), "unregistered").unwrap();
        assert_eq!(untouched, raw);
    }

    #[test]
    fn test_blocking_and_async_agree() {
        let mut blocking = shell_replying("HI-ECHO");
        blocking.add_input_port(uppercase_port("shout"));
        let blocking_result = blocking
            .process_input_blocking(Message::user("hi"), "shout")
            .unwrap();

        let mut suspending = shell_replying("HI-ECHO");
        suspending.add_input_port(uppercase_port("shout"));
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let async_result = runtime
            .block_on(suspending.process_input(Message::user("hi"), "shout"))
            .unwrap();

        assert_eq!(blocking_result, async_result);
        assert_eq!(blocking.ghost().history(), suspending.ghost().history());
    }

    #[test]
    fn test_port_registration_replaces_by_name() {
        let mut shell = shell_replying("ok");
        shell.add_input_port(uppercase_port("shout"));
        shell.add_input_port(InputPort::new("shout"));
        shell.add_input_port(InputPort::new("alpha"));

        assert_eq!(shell.input_channels(), vec!["alpha", "shout"]);
        shell
            .process_input_blocking(Message::user("calm"), "shout")
            .unwrap();
        assert_eq!(shell.ghost().history()[0].content, "calm");
    }
}
