mod cli;
mod grammar;
