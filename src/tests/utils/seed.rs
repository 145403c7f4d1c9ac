use ::surrealdb::{Surreal, engine::remote::ws::Client, sql::Thing};

use crate::domain::models::hotel::Hotel;

pub struct SeededAccount {
    pub id: String,
    pub email: String,
    pub password: String,
}

pub fn hotel(
    id: &str,
    name: &str,
    country: &str,
    star_rating: i64,
    cost_per_night: f64,
    available: bool,
) -> Hotel {
    Hotel {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} in {country}"),
        image: Some(format!("hotels/{id}")),
        star_rating,
        country: country.to_string(),
        cost_per_night,
        available,
    }
}

pub async fn seed_account(conn: &Surreal<Client>, is_admin: bool) -> SeededAccount {
    let email = if is_admin {
        "admin@lets-travel.com"
    } else {
        "traveller@lets-travel.com"
    };
    let password = "stR0ngP4ssw0rd";

    let thing: Option<Thing> = conn
        .query(
            r#"
            LET $account = (CREATE account CONTENT {
                first_name: 'Test',
                surname: 'Traveller',
                email: $email,
                password: crypto::argon2::generate($password),
                is_admin: $is_admin
            });
            RETURN $account[0].id;
            "#,
        )
        .bind(("email", email))
        .bind(("password", password))
        .bind(("is_admin", is_admin))
        .await
        .unwrap()
        .take(1)
        .unwrap();

    SeededAccount {
        id: thing.unwrap().id.to_raw(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub async fn seed_hotel(
    conn: &Surreal<Client>,
    name: &str,
    country: &str,
    star_rating: i64,
    cost_per_night: f64,
    available: bool,
) -> String {
    let thing: Option<Thing> = conn
        .query(
            r#"
            LET $hotel = (CREATE hotel CONTENT {
                name: $name,
                description: 'Seeded listing',
                image: NONE,
                star_rating: $star_rating,
                country: $country,
                cost_per_night: <float> $cost_per_night,
                available: $available
            });
            RETURN $hotel[0].id;
            "#,
        )
        .bind(("name", name.to_string()))
        .bind(("country", country.to_string()))
        .bind(("star_rating", star_rating))
        .bind(("cost_per_night", cost_per_night))
        .bind(("available", available))
        .await
        .unwrap()
        .take(1)
        .unwrap();

    thing.unwrap().id.to_raw()
}
