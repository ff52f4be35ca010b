//! Movie catalog: movies, genres, directors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Director {
    pub name: String,
    pub bio: String,
    pub birth_year: i32,
    pub death_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: Genre,
    pub director: Director,
    pub image_url: String,
    pub featured: bool,
}

fn movie(
    title: &str,
    description: &str,
    genre: (&str, &str),
    director: (&str, &str, i32),
    image_url: &str,
    featured: bool,
) -> Movie {
    Movie {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        genre: Genre {
            name: genre.0.to_string(),
            description: genre.1.to_string(),
        },
        director: Director {
            name: director.0.to_string(),
            bio: director.1.to_string(),
            birth_year: director.2,
            death_year: None,
        },
        image_url: image_url.to_string(),
        featured,
    }
}

/// Catalog loaded into the in-memory store.
pub fn seed_catalog() -> Vec<Movie> {
    vec![
        movie(
            "Interstellar",
            "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
            ("SciFi", "Speculative fiction built around imagined science and technology."),
            ("Christopher Nolan", "British-American filmmaker known for non-linear storytelling.", 1970),
            "https://posters.movieposterdb.com/15_03/2014/816692/l_816692_284eb9d5.jpg",
            true,
        ),
        movie(
            "The Last of the Mohicans",
            "Three trappers protect the daughters of a British Colonel in the midst of the French and Indian War.",
            ("Historical", "Stories set in, and drawing on, a real period of the past."),
            ("Michael Mann", "American director and producer of stylized crime dramas.", 1943),
            "https://posters.movieposterdb.com/12_05/1992/104691/l_104691_746b6d56.jpg",
            false,
        ),
        movie(
            "Shaun of the Dead",
            "The uneventful, aimless lives of a London electronics salesman and his layabout roommate are disrupted by the zombie apocalypse.",
            ("Comedy", "Films designed to make the audience laugh."),
            ("Edgar Wright", "English filmmaker known for fast-paced genre comedies.", 1974),
            "https://posters.movieposterdb.com/05_08/2004/0365748/l_47636_0365748_26fdd550.jpg",
            false,
        ),
        movie(
            "The Departed",
            "An undercover cop and a mole in the police attempt to identify each other while infiltrating an Irish gang in South Boston.",
            ("Crime", "Stories centered on criminals, crimes and their investigation."),
            ("Martin Scorsese", "American filmmaker and a major figure of the New Hollywood era.", 1942),
            "https://posters.movieposterdb.com/06_10/2006/0407887/l_138581_0407887_3f7c779a.jpg",
            true,
        ),
        movie(
            "Star Wars: Revenge of the Sith",
            "Three years into the Clone Wars, the Jedi rescue Palpatine from Count Dooku. As Obi-Wan pursues a new threat, Anakin acts as a double agent between the Jedi Council and Palpatine and is lured into a sinister plan to rule the galaxy.",
            ("Fantasy", "Stories set in invented worlds, often involving magic or myth."),
            ("George Lucas", "American filmmaker who created the Star Wars franchise.", 1944),
            "https://posters.movieposterdb.com/12_04/2005/121766/l_121766_0ba97f41.jpg",
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_catalog_titles_are_unique() {
        let catalog = seed_catalog();
        let titles: HashSet<_> = catalog.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles.len(), catalog.len());
    }

    #[test]
    fn movie_serializes_nested_genre_and_director() {
        let json = serde_json::to_value(&seed_catalog()[0]).unwrap();
        assert_eq!(json["genre"]["name"], "SciFi");
        assert_eq!(json["director"]["birth_year"], 1970);
        assert!(json["director"]["death_year"].is_null());
    }
}
