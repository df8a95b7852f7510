use infrastructure_common::{registered_type_facts, TypeRef};
use registration_macros::{contract, register};
use std::marker::PhantomData;

pub trait Handler<T> {}

pub struct Refund;

pub struct Cached<T>(PhantomData<T>);

#[register(scoped, register_self)]
pub type RefundHandler = Cached<Refund>;

#[contract]
impl Handler<Refund> for Cached<Refund> {}

fn main() {
    let facts = registered_type_facts();
    assert_eq!(facts.len(), 2);
    assert_eq!(facts[0].type_ref, facts[1].type_ref);
    let definition = facts[0].type_ref.generic_definition().map(|d| d.name().to_string());
    assert!(definition.is_some_and(|name| name.ends_with("::Cached<>")));
    assert!(!facts[0].type_ref.is_generic_definition());
    assert_ne!(facts[0].type_ref, TypeRef::new("Cached<Refund>"));
}
