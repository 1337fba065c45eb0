//! CGI handler.
//!
//! Serves a single request per process: the request environment comes from
//! the process environment, the body from standard input, and the response is
//! written to standard output.

use harbor_core::{App, BoxError, Handler, Options, Request, SharedApp};
use std::{
    collections::BTreeMap,
    io::{self, Read, Write},
};

/// Handler speaking the Common Gateway Interface.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cgi;

crate::submit_handler!("harbor::handler::Cgi" => Cgi);

impl Cgi {
    /// Serve one request from `env` and `input`, writing the response to `output`.
    ///
    /// At most `CONTENT_LENGTH` bytes of body are read; a missing or invalid
    /// length reads no body. Header values containing newlines are written
    /// as one header line per value.
    pub fn serve<R: Read, W: Write>(
        app: &dyn App,
        env: BTreeMap<String, String>,
        input: R,
        mut output: W,
    ) -> io::Result<()> {
        let length = env
            .get("CONTENT_LENGTH")
            .and_then(|len| len.trim().parse::<u64>().ok())
            .unwrap_or(0);

        let mut body = Vec::new();
        input.take(length).read_to_end(&mut body)?;

        let response = app.call(Request::new(env, body));

        #[cfg(feature = "tracing")]
        tracing::debug!(status = response.status, "serving CGI response");

        write!(output, "Status: {}\r\n", response.status)?;
        for (name, value) in &response.headers {
            for line in value.split('\n') {
                write!(output, "{name}: {line}\r\n")?;
            }
        }
        output.write_all(b"\r\n")?;
        output.write_all(&response.body)?;
        output.flush()
    }
}

impl Handler for Cgi {
    fn run(&self, app: SharedApp, _options: &Options) -> Result<(), BoxError> {
        let env = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();

        Self::serve(app.as_ref(), env, io::stdin().lock(), io::stdout().lock())?;
        Ok(())
    }
}
