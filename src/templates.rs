use maud::{html, Markup, DOCTYPE};

use crate::{
    client_ip::ClientIp,
    entities::{actor, actor::Gender, director, movie},
    forms::{FeedbackForm, FormErrors, FormState, RatingForm},
    models::{
        ActorDetail, DirectorDetail, FilterSidebar, GenreDetail, MovieDetail, Paged,
        IMDB_FLOOR_CHOICES, RECENCY_CHOICES,
    },
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn movie_list_page(
    movies: &[movie::Model],
    sidebar: &FilterSidebar,
    ip: &ClientIp,
) -> String {
    page(
        "Movies",
        with_sidebar(
            sidebar,
            html! {
                h1 class="text-3xl font-bold text-gray-900" { "Movies" }
                @if let Some(key) = ip.key() {
                    p class="mt-1 text-xs text-gray-400" { "Ratings from this browser are keyed to " (key) }
                }
                (movie_grid(movies))
            },
        ),
    )
}

pub fn filter_page(paged: &Paged, sidebar: &FilterSidebar, echo: &str) -> String {
    page(
        "Filtered movies",
        with_sidebar(
            sidebar,
            html! {
                h1 class="text-3xl font-bold text-gray-900" { "Filtered movies" }
                @if paged.movies.is_empty() {
                    p class="mt-6 text-gray-600" { "Nothing matches this filter." }
                } @else {
                    (movie_grid(&paged.movies))
                }
                (pager("/filter", echo, paged))
            },
        ),
    )
}

pub fn search_page(paged: &Paged, sidebar: &FilterSidebar, q: &str) -> String {
    let echo = format!("q={}&", urlencoding::encode(q));
    page(
        "Search",
        with_sidebar(
            sidebar,
            html! {
                h1 class="text-3xl font-bold text-gray-900" { "Search" }
                @if q.trim().is_empty() {
                    p class="mt-6 text-gray-600" { "Type something to search for." }
                } @else if paged.movies.is_empty() {
                    p class="mt-6 text-gray-600" { "No movies match " span class="font-semibold" { (q) } "." }
                } @else {
                    p class="mt-1 text-sm text-gray-500" { "Results for " span class="font-semibold" { (q) } }
                    (movie_grid(&paged.movies))
                }
                (pager("/search", &echo, paged))
            },
        ),
    )
}

pub fn movie_detail_page(
    detail: &MovieDetail,
    sidebar: &FilterSidebar,
    ip: &ClientIp,
    rating: &FormState<RatingForm>,
    feedback: &FormState<FeedbackForm>,
) -> String {
    let movie = &detail.movie;
    page(
        &movie.name,
        with_sidebar(
            sidebar,
            html! {
                div class="bg-white shadow rounded-lg p-8" {
                    div class="flex items-start gap-6" {
                        @if let Some(picture) = &movie.picture {
                            img class="w-40 rounded-md object-cover" src=(picture) alt=(movie.name);
                        }
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { (movie.name) }
                            @if movie.original_name != movie.name {
                                p class="mt-1 text-gray-500" { (movie.original_name) }
                            }
                            p class="mt-2 text-sm text-gray-600" {
                                (movie.year) " · " (movie.length) " min · IMDB " (movie.rating_imdb)
                            }
                            @if let Some(director) = &detail.director {
                                p class="mt-2 text-sm text-gray-600" {
                                    "Directed by "
                                    a class="text-blue-600 hover:text-blue-800" href=(format!("/directors/{}", director.slug)) {
                                        (director.first_name) " " (director.last_name)
                                    }
                                }
                            }
                            div class="mt-3 flex flex-wrap gap-2" {
                                @for genre in &detail.genres {
                                    a class="rounded-full bg-gray-100 px-3 py-1 text-xs text-gray-700 hover:bg-gray-200" href=(format!("/movies/{}", genre.id)) {
                                        (genre.name)
                                    }
                                }
                            }
                        }
                    }

                    p class="mt-6 text-gray-700" { (movie.description) }

                    @if !detail.actors.is_empty() {
                        h2 class="mt-8 text-xl font-semibold text-gray-900" { "Cast" }
                        ul class="mt-3 grid gap-2 sm:grid-cols-2" {
                            @for actor in &detail.actors {
                                li {
                                    a class="text-blue-600 hover:text-blue-800" href=(format!("/actors/{}", actor.slug)) {
                                        (actor.first_name) " " (actor.last_name)
                                    }
                                }
                            }
                        }
                    }
                }

                @if let Some(key) = ip.key() {
                    p class="mt-6 text-xs text-gray-400" { "Your rating is keyed to " (key) }
                }
                div class="mt-6 grid gap-6 md:grid-cols-2" {
                    (rating_form(movie.id, rating))
                    (feedback_form(movie.id, feedback))
                }
            },
        ),
    )
}

pub fn actor_list_page(actors: &[actor::Model]) -> String {
    page(
        "Actors",
        shell(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Actors" }
            ul class="mt-6 grid gap-3 sm:grid-cols-2 lg:grid-cols-3" {
                @for actor in actors {
                    li class="bg-white shadow rounded-lg p-4" {
                        a class="font-medium text-blue-600 hover:text-blue-800" href=(format!("/actors/{}", actor.slug)) {
                            (actor.first_name) " " (actor.last_name)
                        }
                        p class="mt-1 text-xs text-gray-500" { (gender_label(actor.gender)) }
                    }
                }
            }
        }),
    )
}

pub fn actor_detail_page(detail: &ActorDetail, sidebar: &FilterSidebar) -> String {
    let actor = &detail.actor;
    let title = format!("{} {}", actor.first_name, actor.last_name);
    page(
        &title,
        with_sidebar(
            sidebar,
            html! {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (title) }
                    p class="mt-1 text-sm text-gray-500" { (gender_label(actor.gender)) }
                    @if let Some(residence) = &detail.residence {
                        p class="mt-3 text-sm text-gray-600" {
                            "Lives at "
                            a class="text-blue-600 hover:text-blue-800" href=(residence.map_coordinate) target="_blank" rel="noopener noreferrer" {
                                (residence.street) " " (residence.number) ", " (residence.city) ", " (residence.country)
                            }
                        }
                    }
                }
                (filmography("Filmography", &detail.movies))
            },
        ),
    )
}

pub fn director_list_page(directors: &[director::Model]) -> String {
    page(
        "Directors",
        shell(html! {
            h1 class="text-3xl font-bold text-gray-900" { "Directors" }
            ul class="mt-6 grid gap-3 sm:grid-cols-2 lg:grid-cols-3" {
                @for director in directors {
                    li class="bg-white shadow rounded-lg p-4" {
                        a class="font-medium text-blue-600 hover:text-blue-800" href=(format!("/directors/{}", director.slug)) {
                            (director.first_name) " " (director.last_name)
                        }
                    }
                }
            }
        }),
    )
}

pub fn director_detail_page(detail: &DirectorDetail, sidebar: &FilterSidebar) -> String {
    let director = &detail.director;
    let title = format!("{} {}", director.first_name, director.last_name);
    page(
        &title,
        with_sidebar(
            sidebar,
            html! {
                div class="bg-white shadow rounded-lg p-8" {
                    h1 class="text-3xl font-bold text-gray-900" { (title) }
                    p class="mt-1 text-sm text-gray-500" { (director.email) }
                }
                (filmography("Movies", &detail.movies))
            },
        ),
    )
}

pub fn genre_page(detail: &GenreDetail) -> String {
    page(
        &detail.genre.name,
        shell(html! {
            h1 class="text-3xl font-bold text-gray-900" { (detail.genre.name) }
            @if detail.movies.is_empty() {
                p class="mt-6 text-gray-600" { "No movies in this genre yet." }
            } @else {
                (movie_grid(&detail.movies))
            }
        }),
    )
}

pub fn not_found_page(what: &str) -> String {
    page(
        "Not found",
        shell(html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Not found" }
                p class="mt-4 text-gray-700" { "There is no " (what) " here." }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back to the movies" }
            }
        }),
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "Error",
        shell(html! {
            div class="bg-white shadow rounded-lg p-8" {
                h1 class="text-2xl font-bold text-gray-900" { "Error" }
                p class="mt-4 text-gray-700" { (message) }
                a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
            }
        }),
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Kinoteka" }
                script src=(TAILWIND_CDN) {}
            }
            body class="min-h-screen bg-gray-50" {
                (header_nav())
                (body)
            }
        }
    }
    .into_string()
}

fn header_nav() -> Markup {
    html! {
        header class="bg-white shadow" {
            div class="max-w-6xl mx-auto flex items-center justify-between gap-6 px-6 py-4" {
                a class="text-xl font-bold text-gray-900" href="/" { "Kinoteka" }
                nav class="flex items-center gap-4 text-sm" {
                    a class="text-gray-600 hover:text-gray-900" href="/" { "Movies" }
                    a class="text-gray-600 hover:text-gray-900" href="/actors" { "Actors" }
                    a class="text-gray-600 hover:text-gray-900" href="/directors" { "Directors" }
                }
                form class="flex items-center gap-2" method="get" action="/search" {
                    input class="rounded-md border border-gray-300 px-3 py-1.5 text-sm focus:border-blue-500 focus:outline-none" type="text" name="q" placeholder="Search movies";
                    button class="rounded-md bg-blue-600 px-3 py-1.5 text-sm font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                }
            }
        }
    }
}

fn shell(content: Markup) -> Markup {
    html! {
        main class="max-w-6xl mx-auto px-6 py-10" { (content) }
    }
}

fn with_sidebar(sidebar: &FilterSidebar, content: Markup) -> Markup {
    html! {
        div class="max-w-6xl mx-auto grid gap-8 px-6 py-10 lg:grid-cols-[16rem_1fr]" {
            aside { (sidebar_form(sidebar)) }
            main { (content) }
        }
    }
}

fn sidebar_form(sidebar: &FilterSidebar) -> Markup {
    html! {
        form class="bg-white shadow rounded-lg p-6 space-y-6 text-sm" method="get" action="/filter" {
            fieldset {
                legend class="font-semibold text-gray-900" { "Year" }
                div class="mt-2 max-h-40 space-y-1 overflow-y-auto" {
                    @for year in &sidebar.years {
                        label class="flex items-center gap-2 text-gray-700" {
                            input type="checkbox" name="year" value=(year);
                            (year)
                        }
                    }
                }
            }

            fieldset {
                legend class="font-semibold text-gray-900" { "Genre" }
                div class="mt-2 max-h-40 space-y-1 overflow-y-auto" {
                    @for genre in &sidebar.genres {
                        label class="flex items-center gap-2 text-gray-700" {
                            input type="checkbox" name="genre" value=(genre.id);
                            (genre.name)
                        }
                    }
                }
            }

            fieldset {
                legend class="font-semibold text-gray-900" { "IMDB rating at least" }
                div class="mt-2 space-y-1" {
                    @for floor in IMDB_FLOOR_CHOICES {
                        label class="flex items-center gap-2 text-gray-700" {
                            input type="radio" name="rating_imdb" value=(floor);
                            (floor)
                        }
                    }
                }
            }

            fieldset {
                legend class="font-semibold text-gray-900" { "My rating at least" }
                div class="mt-2 space-y-1" {
                    @for floor in IMDB_FLOOR_CHOICES {
                        label class="flex items-center gap-2 text-gray-700" {
                            input type="radio" name="my_rating" value=(floor);
                            (floor)
                        }
                    }
                }
            }

            fieldset {
                legend class="font-semibold text-gray-900" { "Viewed at least" }
                div class="mt-2 space-y-1" {
                    @for periods in RECENCY_CHOICES {
                        label class="flex items-center gap-2 text-gray-700" {
                            input type="radio" name="my_date" value=(periods);
                            @if periods == 0 { "any time ago" } @else { (periods) " month(s) ago" }
                        }
                    }
                }
            }

            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Apply filter" }
        }
    }
}

fn movie_grid(movies: &[movie::Model]) -> Markup {
    html! {
        div class="mt-6 grid gap-4 sm:grid-cols-2" {
            @for movie in movies {
                (movie_card(movie))
            }
        }
    }
}

fn movie_card(movie: &movie::Model) -> Markup {
    html! {
        div class="bg-white shadow rounded-lg p-6" {
            h2 class="text-lg font-semibold" {
                a class="text-gray-900 hover:text-blue-700" href=(format!("/movies/{}", movie.slug)) {
                    (movie.name)
                }
            }
            @if movie.original_name != movie.name {
                p class="text-sm text-gray-500" { (movie.original_name) }
            }
            p class="mt-2 text-sm text-gray-600" { (movie.year) " · IMDB " (movie.rating_imdb) }
        }
    }
}

fn filmography(heading: &str, movies: &[movie::Model]) -> Markup {
    html! {
        h2 class="mt-8 text-xl font-semibold text-gray-900" { (heading) }
        @if movies.is_empty() {
            p class="mt-3 text-gray-600" { "Nothing in the catalog yet." }
        } @else {
            (movie_grid(movies))
        }
    }
}

fn pager(base: &str, echo: &str, paged: &Paged) -> Markup {
    html! {
        @if paged.pages > 1 {
            nav class="mt-8 flex items-center gap-4 text-sm" {
                @if paged.page > 1 {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("{base}?{echo}page={}", paged.page - 1)) { "Previous" }
                }
                span class="text-gray-500" { "Page " (paged.page) " of " (paged.pages) }
                @if paged.page < paged.pages {
                    a class="text-blue-600 hover:text-blue-800" href=(format!("{base}?{echo}page={}", paged.page + 1)) { "Next" }
                }
            }
        }
    }
}

fn rating_form(movie_id: i32, state: &FormState<RatingForm>) -> Markup {
    html! {
        form class="bg-white shadow rounded-lg p-6" method="post" action=(format!("/review/{movie_id}")) {
            h2 class="text-lg font-semibold text-gray-900" { "Rate this movie" }
            div class="mt-4" {
                label class="block text-sm font-medium text-gray-700" for="rating" { "Your rating (0-10)" }
                input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="text" name="rating" id="rating" inputmode="decimal" value=(state.values.rating);
                (field_error(&state.errors, "rating"))
            }
            div class="mt-4" {
                label class="block text-sm font-medium text-gray-700" for="viewed_date" { "Viewed on (optional)" }
                input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="date" name="viewed_date" id="viewed_date" value=(state.values.viewed_date);
                (field_error(&state.errors, "viewed_date"))
            }
            button class="mt-6 w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Save rating" }
        }
    }
}

fn feedback_form(movie_id: i32, state: &FormState<FeedbackForm>) -> Markup {
    html! {
        form class="bg-white shadow rounded-lg p-6" method="post" action=(format!("/feedback/{movie_id}")) {
            h2 class="text-lg font-semibold text-gray-900" { "Leave feedback" }
            div class="mt-4" {
                label class="block text-sm font-medium text-gray-700" for="name" { "Name" }
                input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="text" name="name" id="name" value=(state.values.name);
                (field_error(&state.errors, "name"))
            }
            div class="mt-4" {
                label class="block text-sm font-medium text-gray-700" for="surname" { "Surname" }
                input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="text" name="surname" id="surname" value=(state.values.surname);
                (field_error(&state.errors, "surname"))
            }
            div class="mt-4" {
                label class="block text-sm font-medium text-gray-700" for="email" { "Email" }
                input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="email" name="email" id="email" value=(state.values.email);
                (field_error(&state.errors, "email"))
            }
            div class="mt-4" {
                label class="block text-sm font-medium text-gray-700" for="feed" { "Your feedback" }
                textarea class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" name="feed" id="feed" rows="4" { (state.values.feed) }
                (field_error(&state.errors, "feed"))
            }
            button class="mt-6 w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Send" }
        }
    }
}

fn field_error(errors: &FormErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.field(field) {
            p class="mt-1 text-sm text-red-600" { (message) }
        }
    }
}

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
    }
}
