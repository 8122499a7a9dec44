use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "casl.pest"]
pub struct CaslParser;
