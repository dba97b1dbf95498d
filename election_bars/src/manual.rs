/*!

This is the long-form manual for `election_bars` and `mdresults`.

## Input format

The results are read from comma separated text. The first line is a header:

```text
jurisdiction,harris,trump,oliver,stein,kennedy,others,total
Kent,5251,5561,60,82,114,60,11128
```

* The first column is the name of the jurisdiction, whatever its header says.
* The other columns are read according to the name in the header. A candidate
  column that is missing from the header is reported when the results are
  displayed. Unknown columns are ignored.
* There is no quoting: a comma always separates two fields, and quotes are
  kept as part of the value.
* The header must list exactly these columns, in this order. Any other header
  is reported once, and the rows are still read by column name.
* A row with a different number of fields than the header is skipped. A blank
  line between two rows is reported the same way, as a row with one field.
  Blank lines at the end of the text are ignored.
* A vote count that is not a non-negative integer is read as `0`.

All of these cases are logged as warnings. None of them stops the program.

Jurisdictions are listed in the root locale collation order: `Éa` comes before
`Eb`, and `kent` before `Kent`.

## Percentages

The percentage of a candidate is computed against the total column of its
jurisdiction (not the sum of the candidate columns) and rounded to one decimal,
half away from zero. The computation is exact: `0.05` rounds to `0.1`.

## Command line

```bash
mdresults                       # statewide results of the embedded dataset
mdresults --county Kent         # one county
mdresults --list                # the county names
mdresults --all --out stdout    # every view, as JSON
mdresults -i results.csv --config settings.json
```

## Configuration

The `--config` flag takes a JSON file. All the fields are optional:

```json
{
  "dataFile": "results.csv",
  "statewideLabel": "Maryland",
  "barWidth": 50,
  "candidates": [
    { "key": "others", "name": "Write-ins", "party": "W" }
  ]
}
```

`dataFile` is relative to the directory of the configuration file. Command line
flags take precedence over the configuration.

*/
