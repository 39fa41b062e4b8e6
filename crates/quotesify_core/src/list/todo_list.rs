use super::{EntityList, ListKind};
use crate::model::todo::ToDo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToDoList {
    todos: Vec<ToDo>,
}

impl EntityList for ToDoList {
    type Item = ToDo;

    const KIND: ListKind = ListKind::ToDo;

    fn items(&self) -> &[ToDo] {
        &self.todos
    }

    fn items_mut(&mut self) -> &mut Vec<ToDo> {
        &mut self.todos
    }
}
