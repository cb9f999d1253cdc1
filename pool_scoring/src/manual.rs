/*!

This is the long-form manual for `pool_scoring` and `pooltab`.

## The pool

Every participant fills in a copy of the tournament spreadsheet: a scoreline
for each of the 48 group matches, and scorelines down the knockout bracket
that determine which teams they expect to advance. The organizers export each
filled spreadsheet as a flat table, load the official results the same way,
and tabulate the standings.

## Tables

Both results and predictions use the same row schema:

```text
id 1;Team 1;id 2;Team 2;Goals 1;Goals 2
```

The group phase has 48 rows. The knockout phase has 16 rows: eight for the
round of 16, four quarterfinals, two semifinals, the third-place match and
the final. Empty cells in the results are legal and mean "not known yet";
empty goal cells in a prediction are a fatal input error.

## The point scheme

Group matches are scored on the scoreline: 6 points for the correct outcome
(win/tie/loss), plus 2 points per exactly matched goal column, for a maximum
of 10 per match. The goal bonuses only count when the outcome is correct.

Knockout rows are scored on team identity, not goals:

* 3 points per correctly predicted qualifier to the round of 16;
* 2 bonus points per group whose (winner, runner-up) pair is predicted in
  the exact order;
* 10 points per correctly predicted quarterfinalist, semifinalist and
  finalist;
* 30 points for naming the champion and 10 for the third-place winner,
  decided by the goal counts of the final and third-place rows.

A team scores for a round when it appears anywhere among the predicted teams
for that round; the exact pairing does not matter. Unresolved slots (empty
cells, or the `nan` / `<NA>` markers that spreadsheet exports produce) are
filtered from both sides before any comparison.

The maximum attainable scores are 480 for the group phase and 244 for the
knockout phase. [crate::verify_full_score] re-scores an entry against itself
and checks exactly these constants; it is the regression guard on the rules.

## Standings

Participants are sorted by decreasing total with a stable sort keyed on the
case-insensitive alias order, and positions 1..N are assigned in sorted
order. Equal totals keep distinct consecutive positions.

 */
