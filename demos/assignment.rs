use assignment_flow::assignment::{solve_assignment, CostMatrix};

fn main() {
    env_logger::init();

    let matrix = match CostMatrix::from_rows(vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]]) {
        Ok(matrix) => matrix,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let assignment = solve_assignment(&matrix);
    println!("{}", assignment.total_cost);
    for (_, column) in assignment.pairs() {
        print!("{column} ");
    }
    println!();
}
