//! Interactive session driving a [`ClusterClient`].
//!
//! The loop mirrors what an operator does at the terminal: pick a data
//! source, run the matching operations, and decide whether to go again.
//! Server refusals are printed and the operator is asked again; fatal
//! errors leave [`Session::run`] and end the session.
use std::io::{self, BufRead, Read, Write};

use log::info;
use thiserror::Error;

use crate::{
    cli::{MenuChoice, Prompt},
    error::ClientError,
    protocol::ClusterClient,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("input error: {0}")]
    Input(#[from] io::Error),
}

pub struct Session<'a, R: BufRead, W: Write, T: Read + Write> {
    prompt: Prompt<R, W>,
    client: &'a mut ClusterClient<T>,
}

impl<'a, R: BufRead, W: Write, T: Read + Write> Session<'a, R, W, T> {
    pub fn new(prompt: Prompt<R, W>, client: &'a mut ClusterClient<T>) -> Self {
        Self { prompt, client }
    }

    /// Run menu rounds until the operator declines another one.
    ///
    /// Input running out ends the session normally.
    pub fn run(&mut self) -> Result<(), SessionError> {
        match self.rounds() {
            Err(SessionError::Input(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                info!("input closed, ending session");
                Ok(())
            }
            res => res,
        }
    }

    fn rounds(&mut self) -> Result<(), SessionError> {
        loop {
            match self.prompt.menu()? {
                MenuChoice::LoadClustersFromFile => self.clusters_from_file()?,
                MenuChoice::LoadDataFromDb => self.clusters_from_db()?,
            }

            if !self
                .prompt
                .confirm("would you choose a new operation from menu?(y/n)")?
            {
                return Ok(());
            }
        }
    }

    fn clusters_from_file(&mut self) -> Result<(), SessionError> {
        let file = self.prompt.text("File Name:")?;
        match self.client.cluster_from_file(&file)? {
            Ok(clusters) => self.prompt.say(clusters)?,
            Err(refusal) => self.prompt.say(refusal)?,
        }
        Ok(())
    }

    fn clusters_from_db(&mut self) -> Result<(), SessionError> {
        loop {
            let table = self.prompt.text("Table name:")?;
            match self.client.load_table_from_db(&table)? {
                Ok(()) => break,
                Err(refusal) => self.prompt.say(refusal)?,
            }
        }

        loop {
            self.cluster_and_store()?;
            if !self.prompt.confirm("Would you repeat?(y/n)")? {
                return Ok(());
            }
        }
    }

    fn cluster_and_store(&mut self) -> Result<(), SessionError> {
        let radius = self.prompt.radius()?;
        let clustering = match self.client.cluster_from_db_table(radius)? {
            Ok(clustering) => clustering,
            Err(refusal) => {
                self.prompt.say(refusal)?;
                return Ok(());
            }
        };
        self.prompt
            .say(format!("Number of Clusters:{}", clustering.count))?;
        self.prompt.say(&clustering.clusters)?;

        let file = self.prompt.text("File Name:")?;
        if let Err(refusal) = self.client.store_cluster_to_file(&file)? {
            self.prompt.say(refusal)?;
        }
        Ok(())
    }

    pub fn into_prompt(self) -> Prompt<R, W> {
        self.prompt
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::{ProtocolTransport, ScriptedStream, SessionState, Value};

    use super::*;

    fn run(input: &str, responses: &[Value]) -> (String, ClusterClient<ScriptedStream>) {
        let mut client = ClusterClient::new(ProtocolTransport::new(ScriptedStream::new(responses)));
        let prompt = Prompt::new(input.as_bytes(), Vec::new());

        let mut session = Session::new(prompt, &mut client);
        session.run().unwrap();
        let (_, out) = session.into_prompt().into_inner();

        (String::from_utf8(out).unwrap(), client)
    }

    fn sent(client: ClusterClient<ScriptedStream>) -> Vec<Value> {
        client.into_transport().into_inner().sent()
    }

    #[test]
    fn file_flow() {
        let (out, client) = run(
            "1\ndata.txt\nn\n",
            &[Value::from("OK"), Value::from("result-desc")],
        );

        assert!(out.contains("File Name:result-desc\n"));
        assert_eq!(sent(client), vec![Value::Int(3), Value::from("data.txt")]);
    }

    #[test]
    fn file_flow_refusal() {
        let (out, _) = run(
            "1\nmissing\nn\n",
            &[Value::from("KO"), Value::from("file not found")],
        );

        assert!(out.contains("file not found\n"));
    }

    #[test]
    fn db_flow_retries_table_then_clusters() {
        let input = "2\nbad\nplaytennis\n2.5\nout\nn\nn\n";
        let responses = [
            Value::from("KO"),
            Value::from("table not found"),
            Value::from("OK"),
            Value::from("OK"),
            Value::Int(3),
            Value::from("cluster-set-desc"),
            Value::from("OK"),
        ];

        let (out, client) = run(input, &responses);

        assert!(out.contains("table not found\n"));
        assert!(out.contains("Number of Clusters:3\ncluster-set-desc\n"));
        assert_eq!(
            sent(client),
            vec![
                Value::Int(0),
                Value::from("bad"),
                Value::Int(0),
                Value::from("playtennis"),
                Value::Int(1),
                Value::Float(2.5),
                Value::Int(2),
                Value::from("out"),
            ]
        );
    }

    #[test]
    fn db_flow_repeat_after_refusal() {
        let input = "2\nt\n1\ny\n0.5\nout\nn\nn\n";
        let responses = [
            Value::from("OK"),
            Value::from("KO"),
            Value::from("empty cluster set"),
            Value::from("OK"),
            Value::Int(1),
            Value::from("one"),
            Value::from("OK"),
        ];

        let (out, client) = run(input, &responses);

        assert!(out.contains("empty cluster set\nWould you repeat?(y/n)"));
        assert_eq!(sent(client).len(), 8);
    }

    #[test]
    fn new_operation_from_menu() {
        let input = "1\na\ny\n1\nb\nn\n";
        let responses = [
            Value::from("OK"),
            Value::from("first"),
            Value::from("OK"),
            Value::from("second"),
        ];

        let (out, _) = run(input, &responses);

        assert!(out.contains("first\n"));
        assert!(out.contains("second\n"));
        assert_eq!(out.matches("(1/2):").count(), 2);
    }

    #[test]
    fn uppercase_answers_continue() {
        let input = "2\nt\n1\nout\nY\n2\nout\nn\nY\n1\nf\nn\n";
        let responses = [
            Value::from("OK"),
            Value::from("OK"),
            Value::Int(1),
            Value::from("one"),
            Value::from("OK"),
            Value::from("OK"),
            Value::Int(1),
            Value::from("wider"),
            Value::from("OK"),
            Value::from("OK"),
            Value::from("stored"),
        ];

        let (out, client) = run(input, &responses);

        assert!(out.contains("wider\n"));
        assert!(out.contains("stored\n"));
        assert_eq!(out.matches("(1/2):").count(), 2);
        assert_eq!(sent(client).len(), 12);
    }

    #[test]
    fn input_closed_ends_session() {
        let (_, client) = run("1\n", &[]);

        assert_eq!(client.state(), SessionState::Connected);
    }

    #[test]
    fn fatal_error_ends_session() {
        let mut client = ClusterClient::new(ProtocolTransport::new(ScriptedStream::new(&[
            Value::from("MAYBE"),
        ])));
        let prompt = Prompt::new("1\nf\n".as_bytes(), Vec::new());

        let err = Session::new(prompt, &mut client).run().unwrap_err();
        assert!(matches!(err, SessionError::Client(ClientError::Framing(_))));
        assert_eq!(client.state(), SessionState::Closed);
    }
}
