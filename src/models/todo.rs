use std::fmt;

use diesel::{Insertable, Queryable};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Queryable)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct Todo {
    pub id: i32,
    pub text: String,
}

/// Body accepted by `POST /todos`. Anything other than an object holding a single
/// string `text` is rejected.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct NewTodo {
    pub text: String,
}

const NEW_TODO_FIELDS: &[&str] = &["text"];

impl<'de> Deserialize<'de> for NewTodo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NewTodoVisitor;

        impl<'de> Visitor<'de> for NewTodoVisitor {
            type Value = NewTodo;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with a `text` string")
            }

            fn visit_map<A>(self, mut map: A) -> Result<NewTodo, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut text: Option<String> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "text" if text.is_some() => return Err(de::Error::duplicate_field("text")),
                        "text" => text = Some(map.next_value()?),
                        other => return Err(de::Error::unknown_field(other, NEW_TODO_FIELDS)),
                    }
                }
                let text = text.ok_or_else(|| de::Error::missing_field("text"))?;
                Ok(NewTodo { text })
            }
        }

        deserializer.deserialize_map(NewTodoVisitor)
    }
}
