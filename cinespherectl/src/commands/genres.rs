use cinesphere_model::Genre;

pub fn run() {
    for genre in Genre::all() {
        println!("{:>6}  {}", genre.tmdb_id(), genre);
    }
}
