//! Built-in question bank for both rounds.
//!
//! Round 1 is a fixed ladder of 30 multiple-choice questions: the first 20
//! carry a single correct option, the last 10 carry exactly two. Round 2 is
//! four coding questions with judge-side test cases. Candidate-facing
//! projections never include correct indices or expected outputs.

use serde::Serialize;

/// Number of questions in the multiple-choice round.
pub const MCQ_QUESTION_COUNT: i32 = 30;

/// Number of questions in the coding round.
pub const DSA_QUESTION_COUNT: i32 = 4;

/// Per-question countdown hint for the multiple-choice round. The client
/// owns the ticking; the server only reports the figure.
pub const MCQ_SECONDS_PER_QUESTION: i64 = 20;

/// How many of the 30 MCQs have a single correct option; the remainder
/// have exactly two.
pub const MCQ_SINGLE_ANSWER_COUNT: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum McqKind {
    Single,
    Double,
}

#[derive(Debug, Clone, Copy)]
pub struct McqQuestion {
    pub question_number: i32,
    pub question_text: &'static str,
    pub options: [&'static str; 4],
    pub correct_indices: &'static [i32],
    pub kind: McqKind,
}

/// Candidate-facing projection of an MCQ; carries no answer key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMcqQuestion {
    pub question_number: i32,
    pub question_text: &'static str,
    pub options: [&'static str; 4],
    #[serde(rename = "type")]
    pub kind: McqKind,
}

impl From<&McqQuestion> for PublicMcqQuestion {
    fn from(q: &McqQuestion) -> Self {
        Self {
            question_number: q.question_number,
            question_text: q.question_text,
            options: q.options,
            kind: q.kind,
        }
    }
}

pub fn mcq_questions() -> &'static [McqQuestion] {
    &MCQ_QUESTIONS
}

pub fn mcq_question(question_number: i32) -> Option<&'static McqQuestion> {
    if (1..=MCQ_QUESTION_COUNT).contains(&question_number) {
        Some(&MCQ_QUESTIONS[(question_number - 1) as usize])
    } else {
        None
    }
}

pub fn mcq_public_questions() -> Vec<PublicMcqQuestion> {
    MCQ_QUESTIONS.iter().map(PublicMcqQuestion::from).collect()
}

/// Correct indices per question, ordered by question number.
pub fn mcq_answer_key() -> Vec<Vec<i32>> {
    MCQ_QUESTIONS
        .iter()
        .map(|q| q.correct_indices.to_vec())
        .collect()
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DsaExample {
    pub input: &'static str,
    pub output: &'static str,
    pub explanation: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DsaTestCase {
    pub input: &'static str,
    pub expected_output: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StarterCode {
    pub cpp: &'static str,
    pub java: &'static str,
    pub javascript: &'static str,
    pub go: &'static str,
    pub python: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DsaQuestion {
    pub question_number: i32,
    pub title: &'static str,
    pub difficulty: &'static str,
    pub topic: &'static str,
    pub description: &'static str,
    pub constraints: &'static [&'static str],
    pub examples: &'static [DsaExample],
    pub points: i32,
    pub test_cases: &'static [DsaTestCase],
    pub starter_code: StarterCode,
}

/// Candidate-facing projection of a coding question; no test cases.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDsaQuestion {
    pub question_number: i32,
    pub title: &'static str,
    pub difficulty: &'static str,
    pub topic: &'static str,
    pub description: &'static str,
    pub constraints: &'static [&'static str],
    pub examples: &'static [DsaExample],
    pub points: i32,
    pub starter_code: StarterCode,
}

impl From<&DsaQuestion> for PublicDsaQuestion {
    fn from(q: &DsaQuestion) -> Self {
        Self {
            question_number: q.question_number,
            title: q.title,
            difficulty: q.difficulty,
            topic: q.topic,
            description: q.description,
            constraints: q.constraints,
            examples: q.examples,
            points: q.points,
            starter_code: q.starter_code,
        }
    }
}

pub fn dsa_questions() -> &'static [DsaQuestion] {
    &DSA_QUESTIONS
}

pub fn dsa_question(question_number: i32) -> Option<&'static DsaQuestion> {
    if (1..=DSA_QUESTION_COUNT).contains(&question_number) {
        Some(&DSA_QUESTIONS[(question_number - 1) as usize])
    } else {
        None
    }
}

pub fn dsa_public_questions() -> Vec<PublicDsaQuestion> {
    DSA_QUESTIONS.iter().map(PublicDsaQuestion::from).collect()
}

pub fn dsa_points_available() -> i32 {
    DSA_QUESTIONS.iter().map(|q| q.points).sum()
}

static MCQ_QUESTIONS: [McqQuestion; 30] = [
    McqQuestion {
        question_number: 1,
        question_text: "Which isolation level prevents dirty reads but allows non-repeatable reads and phantom reads?",
        options: ["Serializable", "Repeatable Read", "Read Committed", "Read Uncommitted"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 2,
        question_text: "Which scheduling algorithm can cause convoy effect?",
        options: ["Round Robin", "Shortest Job First", "First Come First Serve", "Multilevel Queue"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 3,
        question_text: "Which protocol maps IP addresses to MAC addresses?",
        options: ["DNS", "ARP", "DHCP", "ICMP"],
        correct_indices: &[1],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 4,
        question_text: "Why are B+ Trees preferred over B Trees?",
        options: ["Faster inserts", "Better cache locality", "All data stored only in leaves", "Less memory usage"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 5,
        question_text: "Which causes thrashing?",
        options: ["High CPU utilization", "Excessive page faults", "Low I/O operations", "High disk throughput"],
        correct_indices: &[1],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 6,
        question_text: "What does git reset --soft HEAD~1 do?",
        options: ["Deletes the last commit permanently", "Removes last commit but keeps changes staged", "Removes last commit and unstages changes", "Reverts the last commit"],
        correct_indices: &[1],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 7,
        question_text: "Which HTTP status code is not cacheable by default?",
        options: ["200", "301", "304", "403"],
        correct_indices: &[3],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 8,
        question_text: "Which issue occurs if a semaphore is initialized incorrectly?",
        options: ["Deadlock", "Livelock", "Starvation", "Race Condition"],
        correct_indices: &[0],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 9,
        question_text: "Which ACID property ensures partial updates are never persisted?",
        options: ["Isolation", "Atomicity", "Durability", "Consistency"],
        correct_indices: &[1],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 10,
        question_text: "Which OSI layer handles encryption and compression?",
        options: ["Transport", "Network", "Presentation", "Session"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 11,
        question_text: "Which architecture improves scalability via event decoupling?",
        options: ["Monolithic", "Layered", "Event-Driven", "Client-Server"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 12,
        question_text: "Which join is generally most expensive?",
        options: ["Index Scan", "Hash Join", "Nested Loop Join", "Merge Join"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 13,
        question_text: "Which page replacement algorithm suffers from Belady's anomaly?",
        options: ["LRU", "Optimal", "FIFO", "LFU"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 14,
        question_text: "Which command safely applies a commit from another branch?",
        options: ["git merge", "git rebase", "git cherry-pick", "git stash"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 15,
        question_text: "Which attack exploits trusting user-provided URLs?",
        options: ["XSS", "CSRF", "SSRF", "SQL Injection"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 16,
        question_text: "Best data structure for implementing an LRU cache?",
        options: ["Stack + Queue", "HashMap + Doubly Linked List", "TreeMap", "Priority Queue"],
        correct_indices: &[1],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 17,
        question_text: "Which system call creates a new process in Unix?",
        options: ["exec()", "spawn()", "fork()", "clone()"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 18,
        question_text: "Which normal form removes transitive dependency?",
        options: ["1NF", "2NF", "3NF", "BCNF"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 19,
        question_text: "Which TCP mechanism controls congestion?",
        options: ["Sliding Window", "Flow Control", "Slow Start", "Port Allocation"],
        correct_indices: &[2],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 20,
        question_text: "Best DB for high-write time-series data?",
        options: ["MySQL", "PostgreSQL", "MongoDB", "InfluxDB"],
        correct_indices: &[3],
        kind: McqKind::Single,
    },
    McqQuestion {
        question_number: 21,
        question_text: "Clustered index properties:",
        options: ["Table data is physically sorted", "Only one clustered index allowed", "Always faster than non-clustered", "Stored separately from data"],
        correct_indices: &[0, 1],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 22,
        question_text: "Necessary conditions for deadlock:",
        options: ["Mutual Exclusion", "Preemption", "Hold and Wait", "Circular Wait"],
        correct_indices: &[0, 2],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 23,
        question_text: "Transport layer protocols:",
        options: ["TCP", "UDP", "ICMP", "ARP"],
        correct_indices: &[0, 1],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 24,
        question_text: "Commands that modify commit history:",
        options: ["git revert", "git rebase", "git reset", "git fetch"],
        correct_indices: &[1, 2],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 25,
        question_text: "Improve horizontal scalability:",
        options: ["Load Balancing", "Vertical Scaling", "Stateless Services", "Single Leader DB"],
        correct_indices: &[0, 2],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 26,
        question_text: "WAL guarantees:",
        options: ["Atomicity", "Isolation", "Durability", "Consistency"],
        correct_indices: &[0, 2],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 27,
        question_text: "Correct thread statements:",
        options: ["Threads share address space", "Threads have separate heap", "Context switch cheaper than process", "Each thread has its own PID"],
        correct_indices: &[0, 2],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 28,
        question_text: "Reduce TTFB:",
        options: ["CDN", "Server-Side Rendering", "Client-Side Caching", "HTTP Keep-Alive"],
        correct_indices: &[0, 1],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 29,
        question_text: "Authentication mechanisms:",
        options: ["OAuth", "JWT", "HTTPS", "AES"],
        correct_indices: &[0, 1],
        kind: McqKind::Double,
    },
    McqQuestion {
        question_number: 30,
        question_text: "Eventual consistency required for:",
        options: ["Payment transactions", "Social media likes", "Distributed caching", "Inventory management"],
        correct_indices: &[1, 2],
        kind: McqKind::Double,
    },
];

static DSA_QUESTIONS: [DsaQuestion; 4] = [
    DsaQuestion {
        question_number: 1,
        title: "Spiral Matrix",
        difficulty: "Medium",
        topic: "Arrays / Simulation",
        description: SPIRAL_DESC,
        constraints: &[
            "m == matrix.length",
            "n == matrix[i].length",
            "1 <= m, n <= 10",
            "-100 <= matrix[i][j] <= 100",
        ],
        examples: &[
            DsaExample {
                input: "[[1,2,3],[4,5,6],[7,8,9]]",
                output: "[1,2,3,6,9,8,7,4,5]",
                explanation: "Spiral order: right, then down, then left, then up",
            },
            DsaExample {
                input: "[[1,2,3,4],[5,6,7,8],[9,10,11,12]]",
                output: "[1,2,3,4,8,12,11,10,9,5,6,7]",
                explanation: "3x4 matrix in spiral order",
            },
        ],
        points: 33,
        test_cases: &[
            DsaTestCase {
                input: "[[1,2,3],[4,5,6],[7,8,9]]",
                expected_output: "[1,2,3,6,9,8,7,4,5]",
            },
            DsaTestCase {
                input: "[[1,2],[3,4]]",
                expected_output: "[1,2,4,3]",
            },
            DsaTestCase {
                input: "[[1]]",
                expected_output: "[1]",
            },
        ],
        starter_code: StarterCode {
            cpp: SPIRAL_CPP,
            java: SPIRAL_JAVA,
            javascript: SPIRAL_JS,
            go: SPIRAL_GO,
            python: SPIRAL_PY,
        },
    },
    DsaQuestion {
        question_number: 2,
        title: "Multiply Strings",
        difficulty: "Medium",
        topic: "Strings / Math",
        description: MULTIPLY_DESC,
        constraints: &[
            "1 <= num1.length, num2.length <= 200",
            "num1 and num2 consist of digits only",
            "Both num1 and num2 do not contain any leading zero, except the number 0 itself",
        ],
        examples: &[
            DsaExample {
                input: "num1 = \"123\", num2 = \"456\"",
                output: "\"56088\"",
                explanation: "123 x 456 = 56088",
            },
            DsaExample {
                input: "num1 = \"2\", num2 = \"3\"",
                output: "\"6\"",
                explanation: "2 x 3 = 6",
            },
        ],
        points: 33,
        test_cases: &[
            DsaTestCase {
                input: "\"123\" \"456\"",
                expected_output: "\"56088\"",
            },
            DsaTestCase {
                input: "\"2\" \"3\"",
                expected_output: "\"6\"",
            },
            DsaTestCase {
                input: "\"0\" \"0\"",
                expected_output: "\"0\"",
            },
        ],
        starter_code: StarterCode {
            cpp: MULTIPLY_CPP,
            java: MULTIPLY_JAVA,
            javascript: MULTIPLY_JS,
            go: MULTIPLY_GO,
            python: MULTIPLY_PY,
        },
    },
    DsaQuestion {
        question_number: 3,
        title: "Steps to Make Array Non-Decreasing",
        difficulty: "Hard",
        topic: "Monotonic Stack / Greedy",
        description: STEPS_DESC,
        constraints: &["1 <= nums.length <= 10^5", "1 <= nums[i] <= 10^9"],
        examples: &[
            DsaExample {
                input: "[5,3,4,4,7,3,6,11,8,5,11]",
                output: "3",
                explanation: "Takes 3 steps to make array non-decreasing",
            },
            DsaExample {
                input: "[4,5,7,7,13]",
                output: "0",
                explanation: "Already non-decreasing",
            },
        ],
        points: 17,
        test_cases: &[
            DsaTestCase {
                input: "[5,3,4,4,7,3,6,11,8,5,11]",
                expected_output: "3",
            },
            DsaTestCase {
                input: "[4,5,7,7,13]",
                expected_output: "0",
            },
            DsaTestCase {
                input: "[1]",
                expected_output: "0",
            },
        ],
        starter_code: StarterCode {
            cpp: STEPS_CPP,
            java: STEPS_JAVA,
            javascript: STEPS_JS,
            go: STEPS_GO,
            python: STEPS_PY,
        },
    },
    DsaQuestion {
        question_number: 4,
        title: "Number of Matching Subsequences",
        difficulty: "Medium",
        topic: "Hashing / Binary Search",
        description: SUBSEQ_DESC,
        constraints: &[
            "1 <= s.length <= 5 * 10^4",
            "1 <= words.length <= 5000",
            "1 <= words[i].length <= 50",
            "s and words[i] consist of only lowercase English letters",
        ],
        examples: &[
            DsaExample {
                input: "s = \"abcde\", words = [\"a\",\"bb\",\"acd\",\"ace\"]",
                output: "3",
                explanation: "[\"a\",\"acd\",\"ace\"] are subsequences",
            },
            DsaExample {
                input: "s = \"dsahjpjauf\", words = [\"ahjpjau\",\"ja\",\"ahbwzgqnuk\",\"ahbwzgqnuk\"]",
                output: "2",
                explanation: "[\"ahjpjau\",\"ja\"] are subsequences",
            },
        ],
        points: 17,
        test_cases: &[
            DsaTestCase {
                input: "\"abcde\" [\"a\",\"bb\",\"acd\",\"ace\"]",
                expected_output: "3",
            },
            DsaTestCase {
                input: "\"dsahjpjauf\" [\"ahjpjau\",\"ja\",\"ahbwzgqnuk\"]",
                expected_output: "2",
            },
        ],
        starter_code: StarterCode {
            cpp: SUBSEQ_CPP,
            java: SUBSEQ_JAVA,
            javascript: SUBSEQ_JS,
            go: SUBSEQ_GO,
            python: SUBSEQ_PY,
        },
    },
];

const SPIRAL_DESC: &str = r#"Given an m x n matrix, return all elements of the matrix in spiral order.

**Example:**
Input: matrix = [[1,2,3],[4,5,6],[7,8,9]]
Output: [1,2,3,6,9,8,7,4,5]

**Explanation:**
Start from top-left, move right, then down, then left, then up in a spiral pattern."#;

const MULTIPLY_DESC: &str = r#"Given two non-negative integers num1 and num2 represented as strings, return the product of num1 and num2, also represented as a string.

**Note:** You must not use any built-in BigInteger library or convert the inputs to integer directly.

**Example:**
Input: num1 = "123", num2 = "456"
Output: "56088""#;

const STEPS_DESC: &str = r#"You are given a 0-indexed integer array nums. In one step, remove all elements nums[i] where nums[i - 1] > nums[i] for all 0 < i < nums.length.

Return the number of steps performed until nums becomes a non-decreasing array.

**Example:**
Input: nums = [5,3,4,4,7,3,6,11,8,5,11]
Output: 3

**Explanation:**
Step 1: [5,3,4,4,7,3,6,11,8,5,11] -> [5,4,4,7,6,11,11]
Step 2: [5,4,4,7,6,11,11] -> [5,7,11,11]
Step 3: [5,7,11,11] -> [5,7,11,11] (non-decreasing)"#;

const SUBSEQ_DESC: &str = r#"Given a string s and an array of strings words, return the number of words[i] that is a subsequence of s.

A subsequence of a string is a new string generated from the original string with some characters (can be none) deleted without changing the relative order of the remaining characters.

**Example:**
Input: s = "abcde", words = ["a","bb","acd","ace"]
Output: 3

**Explanation:**
- "a" is a subsequence of "abcde"
- "bb" is NOT a subsequence
- "acd" is a subsequence
- "ace" is a subsequence"#;

const SPIRAL_CPP: &str = r#"#include <vector>
using namespace std;

vector<int> spiralOrder(vector<vector<int>>& matrix) {
    // Your code here
}"#;

const SPIRAL_JAVA: &str = r#"class Solution {
    public List<Integer> spiralOrder(int[][] matrix) {
        // Your code here
    }
}"#;

const SPIRAL_JS: &str = r#"function spiralOrder(matrix) {
    // Your code here
}"#;

const SPIRAL_GO: &str = r#"func spiralOrder(matrix [][]int) []int {
    // Your code here
}"#;

const SPIRAL_PY: &str = r#"def spiralOrder(matrix):
    # Your code here
    pass"#;

const MULTIPLY_CPP: &str = r#"#include <string>
using namespace std;

string multiply(string num1, string num2) {
    // Your code here
}"#;

const MULTIPLY_JAVA: &str = r#"class Solution {
    public String multiply(String num1, String num2) {
        // Your code here
    }
}"#;

const MULTIPLY_JS: &str = r#"function multiply(num1, num2) {
    // Your code here
}"#;

const MULTIPLY_GO: &str = r#"func multiply(num1 string, num2 string) string {
    // Your code here
}"#;

const MULTIPLY_PY: &str = r#"def multiply(num1, num2):
    # Your code here
    pass"#;

const STEPS_CPP: &str = r#"#include <vector>
using namespace std;

int totalSteps(vector<int>& nums) {
    // Your code here
}"#;

const STEPS_JAVA: &str = r#"class Solution {
    public int totalSteps(int[] nums) {
        // Your code here
    }
}"#;

const STEPS_JS: &str = r#"function totalSteps(nums) {
    // Your code here
}"#;

const STEPS_GO: &str = r#"func totalSteps(nums []int) int {
    // Your code here
}"#;

const STEPS_PY: &str = r#"def totalSteps(nums):
    # Your code here
    pass"#;

const SUBSEQ_CPP: &str = r#"#include <string>
#include <vector>
using namespace std;

int numMatchingSubseq(string s, vector<string>& words) {
    // Your code here
}"#;

const SUBSEQ_JAVA: &str = r#"class Solution {
    public int numMatchingSubseq(String s, String[] words) {
        // Your code here
    }
}"#;

const SUBSEQ_JS: &str = r#"function numMatchingSubseq(s, words) {
    // Your code here
}"#;

const SUBSEQ_GO: &str = r#"func numMatchingSubseq(s string, words []string) int {
    // Your code here
}"#;

const SUBSEQ_PY: &str = r#"def numMatchingSubseq(s, words):
    # Your code here
    pass"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mcq_bank_is_dense_and_ordered() {
        assert_eq!(mcq_questions().len(), MCQ_QUESTION_COUNT as usize);
        for (i, q) in mcq_questions().iter().enumerate() {
            assert_eq!(q.question_number, i as i32 + 1);
            assert!(q.correct_indices.iter().all(|&idx| (0..4).contains(&idx)));
        }
    }

    #[test]
    fn first_twenty_are_single_last_ten_are_double() {
        for q in mcq_questions() {
            if q.question_number <= MCQ_SINGLE_ANSWER_COUNT {
                assert_eq!(q.kind, McqKind::Single, "q{}", q.question_number);
                assert_eq!(q.correct_indices.len(), 1, "q{}", q.question_number);
            } else {
                assert_eq!(q.kind, McqKind::Double, "q{}", q.question_number);
                assert_eq!(q.correct_indices.len(), 2, "q{}", q.question_number);
            }
        }
    }

    #[test]
    fn mcq_lookup_rejects_out_of_range_numbers() {
        assert!(mcq_question(0).is_none());
        assert!(mcq_question(31).is_none());
        assert_eq!(mcq_question(1).unwrap().question_number, 1);
        assert_eq!(mcq_question(30).unwrap().question_number, 30);
    }

    #[test]
    fn public_mcq_projection_has_no_answer_key() {
        let value = serde_json::to_value(mcq_public_questions()).unwrap();
        let first = &value[0];
        assert!(first.get("questionText").is_some());
        assert!(first.get("correctIndices").is_none());
    }

    #[test]
    fn dsa_points_sum_to_one_hundred() {
        assert_eq!(dsa_questions().len(), DSA_QUESTION_COUNT as usize);
        assert_eq!(dsa_points_available(), 100);
    }

    #[test]
    fn every_dsa_question_has_tests_and_all_starters() {
        for q in dsa_questions() {
            assert!(!q.test_cases.is_empty(), "{}", q.title);
            let starters = [
                q.starter_code.cpp,
                q.starter_code.java,
                q.starter_code.javascript,
                q.starter_code.go,
                q.starter_code.python,
            ];
            for starter in starters {
                assert!(!starter.is_empty(), "{} has an empty starter", q.title);
            }
        }
    }

    #[test]
    fn public_dsa_projection_has_no_test_cases() {
        let value = serde_json::to_value(dsa_public_questions()).unwrap();
        let first = &value[0];
        assert!(first.get("starterCode").is_some());
        assert!(first.get("testCases").is_none());
        assert!(first.get("expectedOutput").is_none());
    }
}
