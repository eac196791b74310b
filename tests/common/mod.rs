#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

pub const WINNERS_CSV: &str = "\
Year,Country,Winner,RunnersUp,Third,Fourth,Attendance,QualifiedTeams,MatchesPlayed
1930,Uruguay,Uruguay,Argentina,USA,Yugoslavia,590549,13,18
1934,Italy,Italy,Czechoslovakia,Germany,Austria,363000,16,17
1938,France,Italy,Hungary,Brazil,Sweden,375700,15,18
1950,Brazil,Uruguay,Brazil,Sweden,Spain,1045246,13,22
";

pub const GOALSCORERS_CSV: &str = "\
date,home_team,away_team,team,scorer,goals
1930-07-13,France,Mexico,France,Lucien Laurent,4
1930-07-17,Uruguay,Peru,Uruguay,Héctor Castro,1
1930-07-30,Uruguay,Argentina,Uruguay,Pedro Cea,4
1930-07-30,Uruguay,Argentina,Argentina,Guillermo Stábile,2
1934-06-10,Italy,Czechoslovakia,Italy,Angelo Schiavio,n/a
1934-06-10,Italy,Czechoslovakia,Italy,Raimundo Orsi,2
";

pub const SCORER_WORLDCUP_CSV: &str = "\
Year,Name,Goals,Country
1930,Guillermo Stábile,8,Argentina
1930,Bert Patenaude,3,USA
1934,Oldřich Nejedlý,5,Czechoslovakia
1938,Leônidas da Silva,7,Brazil
1950,Ademir,9,Brazil
";

pub const SUMMARY_COMBINED_CSV: &str = "\
Country,Matches Played,Wins,Losses,Home Wins,World Cups Won,World Cup Locations,Shootout Wins
Uruguay,59,24,22,4,2,1930,3
Italy,83,45,17,5,4,1934,2
Brazil,114,76,19,10,5,1950,4
";

/// Writes the four conventional dataset files into the workspace root.
pub fn write_standard_datasets(workspace: &TestWorkspace) {
    workspace.write("winners.csv", WINNERS_CSV);
    workspace.write("goalscorers.csv", GOALSCORERS_CSV);
    workspace.write("scorer_worldcup.csv", SCORER_WORLDCUP_CSV);
    workspace.write("summary_combined.csv", SUMMARY_COMBINED_CSV);
}
