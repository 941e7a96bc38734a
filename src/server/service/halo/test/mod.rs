mod chain;
mod envelope;
mod fanout;
mod support;
