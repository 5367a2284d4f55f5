use crate::core::entropy::Entropy;
use crate::core::example::ExampleDef;
use crate::core::transcript::Transcript;
use crate::domain::model::Category;
use std::collections::HashMap;

pub const EXAMPLES: &[ExampleDef] = &[
    ExampleDef::new(
        "mediator/structural",
        Category::Behavioral,
        "Two colleagues talking only through a mediator",
        structural,
    ),
    ExampleDef::new(
        "mediator/chatroom",
        Category::Behavioral,
        "Chatroom relaying messages between registered participants",
        chatroom,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seat {
    First,
    Second,
}

struct Colleague {
    label: &'static str,
}

impl Colleague {
    fn notify(&self, message: &str, out: &mut Transcript) {
        out.line(format!("{} gets message: {}", self.label, message));
    }
}

/// Owns both colleagues; a message from one seat is delivered to the other.
struct PairMediator {
    first: Colleague,
    second: Colleague,
}

impl PairMediator {
    fn send(&self, message: &str, from: Seat, out: &mut Transcript) {
        let recipient = match from {
            Seat::First => &self.second,
            Seat::Second => &self.first,
        };
        recipient.notify(message, out);
    }
}

fn structural(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mediator = PairMediator {
        first: Colleague { label: "Colleague1" },
        second: Colleague { label: "Colleague2" },
    };
    mediator.send("How are you?", Seat::First, out);
    mediator.send("Fine, thanks", Seat::Second, out);
    Ok(())
}

trait Participant {
    fn name(&self) -> &str;

    fn greeting(&self) -> &'static str;

    fn receive(&self, from: &str, message: &str, out: &mut Transcript) {
        out.line(self.greeting());
        out.append(&format!("{} to {}: '{}'", from, self.name(), message));
    }
}

struct Beatle(&'static str);

impl Participant for Beatle {
    fn name(&self) -> &str {
        self.0
    }

    fn greeting(&self) -> &'static str {
        "To a Beatle: "
    }
}

struct NonBeatle(&'static str);

impl Participant for NonBeatle {
    fn name(&self) -> &str {
        self.0
    }

    fn greeting(&self) -> &'static str {
        "To a non-Beatle: "
    }
}

/// The mediator. Participants never talk to each other directly; every
/// message goes through `send`, and unknown recipients are dropped.
#[derive(Default)]
struct Chatroom {
    participants: HashMap<String, Box<dyn Participant>>,
}

impl Chatroom {
    fn register(&mut self, participant: Box<dyn Participant>) {
        self.participants
            .entry(participant.name().to_string())
            .or_insert(participant);
    }

    fn send(&self, from: &str, to: &str, message: &str, out: &mut Transcript) {
        if let Some(recipient) = self.participants.get(to) {
            recipient.receive(from, message, out);
        }
    }
}

fn chatroom(out: &mut Transcript, _entropy: &mut Entropy) -> anyhow::Result<()> {
    let mut room = Chatroom::default();
    for name in ["George", "Paul", "Ringo", "John"] {
        room.register(Box::new(Beatle(name)));
    }
    room.register(Box::new(NonBeatle("Yoko")));
    room.register(Box::new(NonBeatle("Mike")));

    let messages = [
        ("Mike", "John", "We miss you!"),
        ("Yoko", "John", "Hi John!"),
        ("Paul", "Ringo", "All you need is love"),
        ("Ringo", "George", "My sweet Lord"),
        ("Paul", "John", "Can't buy me love"),
        ("John", "Yoko", "My sweet love"),
        ("John", "Mike", "Hi Mike"),
        // Bob never registered
        ("John", "Bob", "Hi Bob"),
    ];
    for (from, to, message) in messages {
        room.send(from, to, message, out);
    }
    Ok(())
}
