use infrastructure_common::{registered_type_facts, TypeFact};
use registration_macros::{contract, register, target_services};

pub trait Greeter {}

#[derive(Debug)]
#[register(transient, register_self)]
#[target_services("api")]
pub struct Hello;

#[contract]
impl Greeter for Hello {}

#[register(singleton)]
pub enum Mode {
    Fast,
}

fn main() {
    let facts = registered_type_facts();
    assert_eq!(facts.len(), 4);
    assert!(facts
        .iter()
        .any(|record| matches!(
            &record.fact,
            TypeFact::Contract(contract)
                if contract.short_name() == "Greeter" && contract.name().ends_with("::Greeter")
        )));
    let _ = (Hello, Mode::Fast);
}
