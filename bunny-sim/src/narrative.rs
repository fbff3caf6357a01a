use crate::rabbit::Rabbit;
use std::fmt::Write;

/// Where the simulation tells its story: births, deaths, the end-of-turn
/// roster and food shortages.
pub trait Narrative {
    fn write(&mut self, text: &str);
}

impl Narrative for String {
    fn write(&mut self, text: &str) {
        self.push_str(text);
    }
}

impl<F> Narrative for F
where
    F: FnMut(&str),
{
    fn write(&mut self, text: &str) {
        self(text)
    }
}

pub(crate) fn born(rabbit: &Rabbit) -> String {
    let mut line = infected_prefix(rabbit);
    let _ = writeln!(line, "Bunny {} was born! ({})", rabbit.name(), info(rabbit));
    line
}

pub(crate) fn died(rabbit: &Rabbit) -> String {
    let mut line = infected_prefix(rabbit);
    let _ = writeln!(line, "Bunny {} died! ({})", rabbit.name(), info(rabbit));
    line
}

pub(crate) fn roster<'a>(rabbits: impl Iterator<Item = &'a Rabbit>) -> String {
    let mut text = String::from("\nBunnies remaining: \n");
    for rabbit in rabbits {
        text.push_str(&infected_prefix(rabbit));
        let loc = rabbit.loc();
        let _ = writeln!(
            text,
            "Bunny {} ({}) at ({}, {})",
            rabbit.name(),
            info(rabbit),
            loc.col,
            loc.row
        );
    }
    text.push('\n');
    text
}

pub(crate) const FOOD_SHORTAGE: &str = "Food shortage occurred!\n";

fn info(rabbit: &Rabbit) -> String {
    format!(
        "{} years old, {}, {}",
        rabbit.age(),
        rabbit.gender(),
        rabbit.colour()
    )
}

fn infected_prefix(rabbit: &Rabbit) -> String {
    if rabbit.infected() {
        String::from("Infected ")
    } else {
        String::new()
    }
}
