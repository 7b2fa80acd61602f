use cosmwasm_std::{Api, Event, Storage};

/// Per-invocation execution context: the state the call may touch, the chain
/// address codec and the events emitted so far.
pub struct Context<'a> {
    pub storage: &'a mut dyn Storage,
    pub api: &'a dyn Api,
    events: Vec<Event>,
}

impl<'a> Context<'a> {
    pub fn new(storage: &'a mut dyn Storage, api: &'a dyn Api) -> Self {
        Self {
            storage,
            api,
            events: vec![],
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}
