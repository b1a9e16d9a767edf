use entity::{Employees, employees};
use sea_orm::{ActiveValue::NotSet, DbErr, EntityTrait, PaginatorTrait, Set};
use tracing::info;

use crate::DbPool;

struct DemoEmployee {
    full_name: Option<&'static str>,
    first_name: Option<&'static str>,
    last_name: Option<&'static str>,
    position: Option<&'static str>,
    department: Option<&'static str>,
    email: Option<&'static str>,
}

// Rows cover the full_name, first+last and nameless name fallbacks plus
// missing position and email. `name` and `title` are not in the dev schema.
const DEMO_EMPLOYEES: &[DemoEmployee] = &[
    DemoEmployee {
        full_name: Some("Ada Lovelace"),
        first_name: Some("Ada"),
        last_name: Some("Lovelace"),
        position: Some("Principal Analyst"),
        department: Some("R&D"),
        email: Some("ada@example.com"),
    },
    DemoEmployee {
        full_name: None,
        first_name: Some("Jo"),
        last_name: Some("Park"),
        position: Some("Engineer"),
        department: Some("Platform"),
        email: Some("jo.park@example.com"),
    },
    DemoEmployee {
        full_name: Some("Sam Lee"),
        first_name: None,
        last_name: None,
        position: None,
        department: Some("Operations"),
        email: None,
    },
    DemoEmployee {
        full_name: None,
        first_name: None,
        last_name: None,
        position: None,
        department: None,
        email: Some("unnamed@example.com"),
    },
];

/// Insert the demo rows into an empty `employees` table. Returns how many rows
/// were written; a table that already has rows is left alone.
pub async fn seed_demo_employees(pool: &DbPool) -> Result<usize, DbErr> {
    let existing = Employees::find().count(pool).await?;
    if existing > 0 {
        info!(existing, "employees table already populated; skipping seed");
        return Ok(0);
    }

    let rows = DEMO_EMPLOYEES
        .iter()
        .map(|demo| employees::ActiveModel {
            id: NotSet,
            full_name: Set(demo.full_name.map(str::to_string)),
            first_name: Set(demo.first_name.map(str::to_string)),
            last_name: Set(demo.last_name.map(str::to_string)),
            position: Set(demo.position.map(str::to_string)),
            department: Set(demo.department.map(str::to_string)),
            email: Set(demo.email.map(str::to_string)),
        })
        .collect::<Vec<_>>();
    Employees::insert_many(rows).exec(pool).await?;
    info!(count = DEMO_EMPLOYEES.len(), "seeded demo employees");
    Ok(DEMO_EMPLOYEES.len())
}
